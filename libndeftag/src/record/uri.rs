//! URI identifier codes (NFC Forum URI RTD, table 3).

const PREFIXES: [&str; 36] = [
    "",
    "http://www.",
    "https://www.",
    "http://",
    "https://",
    "tel:",
    "mailto:",
    "ftp://anonymous:anonymous@",
    "ftp://ftp.",
    "ftps://",
    "sftp://",
    "smb://",
    "nfs://",
    "ftp://",
    "dav://",
    "news:",
    "telnet://",
    "imap:",
    "rtsp://",
    "urn:",
    "pop:",
    "sip:",
    "sips:",
    "tftp:",
    "btspp://",
    "btl2cap://",
    "btgoep://",
    "tcpobex://",
    "irdaobex://",
    "file://",
    "urn:epc:id:",
    "urn:epc:tag:",
    "urn:epc:pat:",
    "urn:epc:raw:",
    "urn:epc:",
    "urn:nfc:",
];

/// Expand a URI record payload. Reserved codes are treated as "no prefix".
pub fn expand(payload: &[u8]) -> Option<String> {
    let (&code, rest) = payload.split_first()?;
    let prefix = PREFIXES.get(code as usize).copied().unwrap_or("");
    let tail = std::str::from_utf8(rest).ok()?;
    Some(format!("{}{}", prefix, tail))
}

/// Abbreviate `uri` with the longest matching prefix.
pub fn abbreviate(uri: &str) -> Vec<u8> {
    let (code, prefix) = PREFIXES
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, p)| uri.starts_with(*p))
        .max_by_key(|(_, p)| p.len())
        .map(|(i, p)| (i as u8, *p))
        .unwrap_or((0, ""));

    let mut out = Vec::with_capacity(1 + uri.len() - prefix.len());
    out.push(code);
    out.extend_from_slice(uri[prefix.len()..].as_bytes());
    out
}
