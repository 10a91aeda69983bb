#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use libndeftag::driver::{DriverCall, MockDriver};
use libndeftag::record::{NdefCodec, Record, RecordCodec, TagMessage, parse_records};
use libndeftag::{Result, TagHandler, Worker, build_frame};

const NOW_PLAYING: &str = "https://open.spotify.com/track/xyz";

#[derive(Default)]
struct Player {
    seen: Vec<String>,
    removed: usize,
    playing: Option<String>,
    // rewrites block 4 on removal so the next presence reads garbage
    corrupt_on_removal: Option<MockDriver>,
    // cleared from inside on_tag
    stop_on_tag: Option<Arc<AtomicBool>>,
}

impl TagHandler for Player {
    fn on_tag(&mut self, message: &TagMessage) -> Result<()> {
        self.seen.push(message.primary_uri().to_string());
        if let Some(flag) = &self.stop_on_tag {
            flag.store(false, Ordering::SeqCst);
        }
        Ok(())
    }

    fn now_playing(&mut self) -> Option<String> {
        self.playing.clone()
    }

    fn on_removed(&mut self) {
        self.removed += 1;
        if let Some(mock) = &self.corrupt_on_removal {
            mock.set_block(4, [0x01; 16]);
        }
    }
}

fn seeded_mock() -> MockDriver {
    let mock = MockDriver::new();
    mock.seed_stream(&build_frame(&common::fixtures::album_message()).unwrap());
    mock
}

fn run_until_drained(mock: &MockDriver, handler: Player) -> Player {
    let running = Arc::new(AtomicBool::new(true));
    mock.stop_when_drained(running.clone());
    let reader = common::reader_over(mock, common::fast_config()).unwrap();
    Worker::new(reader, handler).run(&running)
}

#[test]
fn last_played_is_written_back_while_present() -> anyhow::Result<()> {
    let mock = seeded_mock();
    // detect, two probes with the tag present, then removal
    mock.push_presence(&[true, true, true, false]);

    let player = run_until_drained(
        &mock,
        Player {
            playing: Some(NOW_PLAYING.to_string()),
            ..Default::default()
        },
    );
    assert_eq!(player.seen, vec!["https://open.spotify.com/album/1"]);
    assert_eq!(player.removed, 1);

    // the second probe finds the pointer already stored
    let calls = mock.calls();
    let header_writes = common::fixtures::written_blocks(&calls)
        .into_iter()
        .filter(|&b| b == 4)
        .count();
    assert_eq!(header_writes, 1);

    let mut reader = common::reader_over(&mock, common::fast_config())?;
    let bytes = reader.read_ndef()?;
    let message = parse_records(&NdefCodec, &bytes, &reader.config().uri_prefixes)?;
    assert_eq!(message.primary_uri(), "https://open.spotify.com/album/1");
    assert_eq!(message.last_played().as_deref(), Some(NOW_PLAYING));
    Ok(())
}

#[test]
fn stored_pointer_is_not_rewritten() -> anyhow::Result<()> {
    let mock = MockDriver::new();
    let bytes = NdefCodec.encode_message(&[
        Record::uri("https://open.spotify.com/album/1"),
        Record::uri(NOW_PLAYING),
    ])?;
    mock.seed_stream(&build_frame(&bytes)?);
    mock.push_presence(&[true, true, false]);

    run_until_drained(
        &mock,
        Player {
            playing: Some(NOW_PLAYING.to_string()),
            ..Default::default()
        },
    );
    assert!(common::fixtures::written_blocks(&mock.calls()).is_empty());
    Ok(())
}

#[test]
fn failed_cycle_does_not_stop_the_loop() {
    let mock = seeded_mock();
    // first tag read fine and removed, the second presence reads bad magic
    mock.push_presence(&[true, false, true]);

    let player = run_until_drained(
        &mock,
        Player {
            corrupt_on_removal: Some(mock.clone()),
            ..Default::default()
        },
    );
    assert_eq!(player.seen.len(), 1);
    assert_eq!(player.removed, 1);

    // bad magic recreate, re-entry after each of three cycles, final release
    let calls = mock.calls();
    assert_eq!(common::fixtures::count(&calls, &DriverCall::Deauthenticate), 5);
    assert_eq!(common::fixtures::count(&calls, &DriverCall::Cleanup), 5);
    assert_eq!(
        common::fixtures::read_blocks(&calls).iter().filter(|&&b| b == 4).count(),
        2
    );
}

#[test]
fn auth_failure_recreates_then_loop_continues() {
    let mock = seeded_mock();
    mock.set_fail_auth_at(Some(4));
    mock.push_presence(&[true]);

    let player = run_until_drained(&mock, Player::default());
    assert!(player.seen.is_empty());

    // auth recreate, two loop re-entries, shutdown
    let calls = mock.calls();
    assert_eq!(common::fixtures::count(&calls, &DriverCall::Deauthenticate), 4);
    assert!(common::fixtures::read_blocks(&calls).is_empty());
}

#[test]
fn cancel_while_present_skips_removal() {
    let mock = seeded_mock();
    mock.push_presence(&[true, true, true]);
    let running = Arc::new(AtomicBool::new(true));

    let reader = common::reader_over(&mock, common::fast_config()).unwrap();
    let player = Worker::new(
        reader,
        Player {
            stop_on_tag: Some(running.clone()),
            ..Default::default()
        },
    )
    .run(&running);

    assert_eq!(player.seen.len(), 1);
    assert_eq!(player.removed, 0);
    assert_eq!(mock.calls().last(), Some(&DriverCall::Cleanup));
}

#[test]
fn failed_write_back_is_retried_on_a_rebuilt_session() {
    let mock = seeded_mock();
    mock.set_fail_write_at(Some(5));
    mock.push_presence(&[true, true, true, false]);

    let player = run_until_drained(
        &mock,
        Player {
            playing: Some(NOW_PLAYING.to_string()),
            ..Default::default()
        },
    );
    assert_eq!(player.removed, 1);

    let calls = mock.calls();
    let failed: Vec<usize> = calls
        .iter()
        .enumerate()
        .filter(|(_, c)| matches!(c, DriverCall::WriteBlock(5, _)))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(failed.len(), 2);

    let between = &calls[failed[0]..failed[1]];
    let deauth = between
        .iter()
        .position(|c| *c == DriverCall::Deauthenticate)
        .expect("session rebuilt before retry");
    assert_eq!(between[deauth + 1], DriverCall::Cleanup);
    assert_eq!(between[deauth + 2], DriverCall::Reinitialize);

    // each attempt starts over from the header block
    let header_writes = common::fixtures::written_blocks(&calls)
        .into_iter()
        .filter(|&b| b == 4)
        .count();
    assert_eq!(header_writes, 2);
}
