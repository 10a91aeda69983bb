// Tag loop against a simulated reader.
//
// Seeds a MockDriver with a Spotify album link, runs the worker until the
// scripted presence probes are used up, then prints the tag contents.
//
// Usage:
//   RUST_LOG=debug cargo run -p libndeftag --example simulated_loop

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use libndeftag::prelude::*;

struct PrintHandler {
    playing: Option<String>,
}

impl TagHandler for PrintHandler {
    fn on_tag(&mut self, message: &TagMessage) -> Result<()> {
        println!("tag links to {}", message.primary_uri());
        if let Some(last) = message.last_played() {
            println!("  last played: {}", last);
        }
        // pretend playback jumps to the first track
        self.playing = Some("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC".into());
        Ok(())
    }

    fn now_playing(&mut self) -> Option<String> {
        self.playing.clone()
    }

    fn on_removed(&mut self) {
        println!("tag removed");
        self.playing = None;
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mock = MockDriver::new().with_uid(&[0x04, 0x5A, 0x11, 0xC2]);
    let message = NdefCodec.encode_message(&[Record::uri(
        "https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3",
    )])?;
    mock.seed_stream(&build_frame(&message)?);
    // two tag presences: each detected, held for a few probes, then removed
    mock.push_presence(&[true, true, true, false, true, true, false]);

    let running = Arc::new(AtomicBool::new(true));
    mock.stop_when_drained(running.clone());

    let shared = mock.clone();
    let reader = ReaderBuilder::new()
        .with_factory(move || Ok(Box::new(shared.clone()) as Box<dyn Driver>))
        .presence_timeout(Duration::from_millis(10))
        .removal_cooldown(Duration::from_millis(50))
        .build()?;

    Worker::new(reader, PrintHandler { playing: None }).run(&running);

    println!("\nfinal tag image:");
    for index in 4..12u8 {
        let block = BlockData::from_bytes(mock.block(index));
        println!("  {:2}: {}  {}", index, block.to_hex(), block.to_ascii_safe());
    }
    Ok(())
}
