#[path = "../common/mod.rs"]
mod common;

use libndeftag::driver::{DriverCall, MockDriver};
use libndeftag::{KeyType, ReaderConfig};

#[test]
fn writer_authenticates_sector_two_before_block_eight() -> anyhow::Result<()> {
    let mock = MockDriver::new();
    let mut reader = common::reader_over(&mock, ReaderConfig::default())?;
    reader.write_ndef(&common::fixtures::payload_of(140))?;

    let calls = mock.calls();
    let first_write_8 = calls
        .iter()
        .position(|c| matches!(c, DriverCall::WriteBlock(8, _)))
        .expect("block 8 written");
    assert_eq!(
        calls[first_write_8 - 1],
        DriverCall::Authenticate {
            key_type: KeyType::B,
            block: 7
        }
    );
    // 145-byte frame: blocks 4-6, 8-10, 12-14, 16
    assert_eq!(
        common::fixtures::written_blocks(&calls),
        vec![4, 5, 6, 8, 9, 10, 12, 13, 14, 16]
    );
    assert_eq!(common::fixtures::auth_blocks(&calls), vec![4, 7, 11, 15]);
    Ok(())
}

#[test]
fn trailers_never_touched_as_data() -> anyhow::Result<()> {
    let mock = MockDriver::new();
    let mut reader = common::reader_over(&mock, ReaderConfig::default())?;
    reader.write_ndef(&common::fixtures::payload_of(255))?;
    assert_eq!(reader.read_ndef()?, common::fixtures::payload_of(255));

    let calls = mock.calls();
    for (i, call) in calls.iter().enumerate() {
        let addr = match call {
            DriverCall::ReadBlock(a) => *a,
            DriverCall::WriteBlock(a, _) => *a,
            _ => continue,
        };
        assert_ne!(addr % 4, 3, "data access to trailer {}", addr);

        // the first access to a new sector directly follows its trailer auth
        if addr % 4 == 0 && addr > 4 {
            assert_eq!(
                calls[i - 1],
                DriverCall::Authenticate {
                    key_type: KeyType::B,
                    block: addr - 1
                }
            );
        }
    }
    Ok(())
}

#[test]
fn auth_failure_mid_write_halts_and_recreates() -> anyhow::Result<()> {
    let mock = MockDriver::new();
    mock.set_fail_auth_at(Some(7));
    let mut reader = common::reader_over(&mock, ReaderConfig::default())?;

    let err = reader.write_ndef(&common::fixtures::payload_of(100)).unwrap_err();
    assert!(matches!(err, libndeftag::Error::Auth { sector: 2 }));

    let calls = mock.calls();
    assert_eq!(common::fixtures::written_blocks(&calls), vec![4, 5, 6]);
    let halt = calls
        .iter()
        .position(|c| *c == DriverCall::HaltCrypto)
        .expect("crypto halted");
    let deauth = calls
        .iter()
        .position(|c| *c == DriverCall::Deauthenticate)
        .expect("session recreated");
    assert!(halt < deauth);
    Ok(())
}
