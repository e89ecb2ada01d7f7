use nib::{Error, sans::header::HEADER_LEN};

const FIXTURES: [&str; 3] = [
    "fixtures/v3-sketch.rm",
    "fixtures/v5-notes.rm",
    "fixtures/v6-page.rm",
];

/// Offsets at which a V6 body may cleanly end: after the header and after
/// every block.
fn block_boundaries(data: &[u8]) -> Vec<usize> {
    let mut boundaries = vec![HEADER_LEN];
    let mut i = HEADER_LEN;

    while i < data.len() {
        let length = u32::from_le_bytes(data[i..i + 4].try_into().unwrap());
        i += 8 + length as usize;
        boundaries.push(i);
    }

    boundaries
}

#[test]
fn truncated_flat_documents_are_corrupt() {
    for path in &FIXTURES[..2] {
        let data = std::fs::read(path).unwrap();
        assert!(nib::decode(&data).is_ok());

        for end in HEADER_LEN..data.len() {
            assert!(
                matches!(nib::decode(&data[..end]), Err(Error::CorruptData(_))),
                "{path} truncated at {end}"
            );
        }
    }
}

#[test]
fn truncated_tagged_documents_are_corrupt_between_blocks() {
    let data = std::fs::read(FIXTURES[2]).unwrap();
    let full = nib::decode(&data).unwrap();

    let boundaries = block_boundaries(&data);
    assert_eq!(boundaries.last(), Some(&data.len()));

    for end in HEADER_LEN..data.len() {
        let result = nib::decode(&data[..end]);

        if boundaries.contains(&end) {
            // A shorter, complete stream holds a prefix of the strokes.
            let document = result.unwrap();
            assert!(document.strokes().len() <= full.strokes().len());
            assert_eq!(document.strokes(), &full.strokes()[..document.strokes().len()]);
        } else {
            assert!(
                matches!(result, Err(Error::CorruptData(_))),
                "truncated at {end}"
            );
        }
    }
}

#[test]
fn truncated_headers_are_unsupported() {
    for path in FIXTURES {
        let data = std::fs::read(path).unwrap();

        for end in 0..HEADER_LEN {
            assert!(matches!(
                nib::decode(&data[..end]),
                Err(Error::UnsupportedFormat(_))
            ));
        }
    }
}

#[test]
fn corrupted_bytes_never_panic() {
    for path in FIXTURES {
        let data = std::fs::read(path).unwrap();

        for i in HEADER_LEN..data.len() {
            for b in [0x00, 0x7F, 0x80, 0xFF] {
                let mut copy = data.clone();
                copy[i] = b;
                // Any outcome but a panic is acceptable.
                let _ = nib::decode(&copy);
            }
        }
    }
}
