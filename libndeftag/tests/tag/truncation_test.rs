#[path = "../common/mod.rs"]
mod common;

use libndeftag::driver::{DriverCall, MockDriver};
use libndeftag::{Error, FrameError, ReaderConfig, RecreateReason, SessionEvent, SessionState};

fn small_tag_config() -> ReaderConfig {
    // blocks 4, 5, 6 readable before the bound
    ReaderConfig {
        block_limit: 8,
        ..Default::default()
    }
}

#[test]
fn short_tag_reports_truncation_and_recreates() -> anyhow::Result<()> {
    let mock = MockDriver::new();
    mock.set_block(4, common::fixtures::header_block(100));
    let mut reader = common::recreating_reader_over(&mock, small_tag_config())?;

    let err = reader.read_ndef().unwrap_err();
    match err {
        Error::Frame(FrameError::Truncated { declared, got }) => {
            assert_eq!(declared, 100);
            assert_eq!(got, 12 + 16 + 16);
            assert!(got < declared);
        }
        other => panic!("expected Truncated, got {:?}", other),
    }

    assert_eq!(
        reader.take_events(),
        vec![SessionEvent::Recreated {
            reason: RecreateReason::Truncated
        }]
    );
    assert_eq!(reader.state(), SessionState::Idle);

    let calls = mock.calls();
    let tail: Vec<_> = calls.iter().rev().take(4).rev().cloned().collect();
    assert_eq!(
        tail,
        vec![
            DriverCall::HaltCrypto,
            DriverCall::Deauthenticate,
            DriverCall::Cleanup,
            DriverCall::Reinitialize
        ]
    );
    Ok(())
}

#[test]
fn truncation_never_reads_past_bound() -> anyhow::Result<()> {
    let mock = MockDriver::new();
    mock.set_block(4, common::fixtures::header_block(200));
    let mut reader = common::reader_over(&mock, small_tag_config())?;
    assert!(reader.read_ndef().is_err());
    assert_eq!(common::fixtures::read_blocks(&mock.calls()), vec![4, 5, 6]);
    Ok(())
}

#[test]
fn zero_length_is_unsupported_and_recreates() -> anyhow::Result<()> {
    let mock = MockDriver::new();
    mock.set_block(4, common::fixtures::header_block(0));
    let mut reader = common::reader_over(&mock, ReaderConfig::default())?;

    assert!(matches!(
        reader.read_ndef(),
        Err(Error::Frame(FrameError::Unsupported))
    ));
    assert_eq!(
        reader.take_events(),
        vec![SessionEvent::Recreated {
            reason: RecreateReason::OperationFailure
        }]
    );
    assert_eq!(common::fixtures::read_blocks(&mock.calls()), vec![4]);
    Ok(())
}

#[test]
fn block_read_error_aborts() -> anyhow::Result<()> {
    let mock = common::mock_with_payload(&common::fixtures::payload_of(60))?;
    mock.set_fail_read_at(Some(5));
    let mut reader = common::reader_over(&mock, ReaderConfig::default())?;
    assert!(matches!(
        reader.read_ndef(),
        Err(Error::BlockRead { address: 5 })
    ));
    let calls = mock.calls();
    let halt = calls
        .iter()
        .rposition(|c| *c == DriverCall::HaltCrypto)
        .expect("crypto halted");
    assert_eq!(calls[halt - 1], DriverCall::ReadBlock(5));
    assert_eq!(
        &calls[halt + 1..],
        &[
            DriverCall::Deauthenticate,
            DriverCall::Cleanup,
            DriverCall::Reinitialize
        ]
    );
    Ok(())
}
