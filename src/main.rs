use std::time::Duration;

use clap::Parser;

use gazelink::capture::synthetic::SyntheticFrameCapturer;
use gazelink::capture::FrameCapturer;
use gazelink::client::StreamClient;
use gazelink::config::ClientConfiguration;
use gazelink::presenter::console::ConsolePresenter;
use gazelink::types::Resolution;

#[derive(Parser)]
#[clap(version = "0.1.0", about = "Relay webcam frames to a gaze inference service")]
struct Options {
    #[clap(short, long, default_value = "ws://localhost:8000/api/v1/ws")]
    endpoint: String,

    #[clap(short, long, default_value = "10")]
    frame_rate: u32,

    #[clap(short, long, default_value = "5000")]
    reconnect_delay_ms: u64,

    #[clap(short, long, default_value = "0.8")]
    jpeg_quality: f32,

    #[clap(short, long, default_value = "640x480")]
    capture_resolution: String,

    /// Use the hardware-free synthetic capture source instead of a webcam.
    #[clap(long)]
    synthetic: bool,

    /// Webcam device index.
    #[clap(short, long, default_value = "0")]
    device: u32,
}

#[cfg(feature = "webcam")]
fn webcam_capturer(
    device: u32,
    resolution: Resolution,
) -> Result<Box<dyn FrameCapturer>, Box<dyn std::error::Error>> {
    use gazelink::capture::webcam::WebcamFrameCapturer;
    Ok(Box::new(WebcamFrameCapturer::new(device, resolution)))
}

#[cfg(not(feature = "webcam"))]
fn webcam_capturer(
    _device: u32,
    _resolution: Resolution,
) -> Result<Box<dyn FrameCapturer>, Box<dyn std::error::Error>> {
    Err("built without the 'webcam' feature, run with --synthetic".into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let options = Options::parse();
    let capture_resolution: Resolution = options.capture_resolution.parse()?;

    let config = ClientConfiguration {
        endpoint: options.endpoint,
        frame_rate: options.frame_rate,
        reconnect_delay: Duration::from_millis(options.reconnect_delay_ms),
        jpeg_quality: options.jpeg_quality,
        capture_resolution,
    };

    let capturer: Box<dyn FrameCapturer> = if options.synthetic {
        Box::new(SyntheticFrameCapturer::new(capture_resolution))
    } else {
        webcam_capturer(options.device, capture_resolution)?
    };

    let client = StreamClient::new(config, capturer, Box::new(ConsolePresenter::new()));

    client.run().await?;

    Ok(())
}
