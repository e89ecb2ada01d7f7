mod stream;

use either::Either::{Left, Right};
use nib::{
    Error,
    sans::{
        Decoder,
        cursor::Corruption,
        header::{Dialect, HEADER_LEN, HEADER_V6, UnsupportedFormat},
    },
};

#[test]
fn headers_route_to_their_dialect() {
    for dialect in [Dialect::V3, Dialect::V5, Dialect::V6] {
        let mut data = stream::header(dialect);
        data.extend([1, 2, 3]);

        let (successor, body) = Decoder::advance(&data).unwrap();
        assert_eq!(body, &[1, 2, 3]);

        match successor {
            Left(state) => assert_eq!(state.dialect(), dialect),
            Right(_) => assert_eq!(dialect, Dialect::V6),
        }
    }
}

#[test]
fn headers_are_exactly_43_bytes() {
    for dialect in [Dialect::V3, Dialect::V5, Dialect::V6] {
        assert_eq!(dialect.header().len(), HEADER_LEN);
        assert!(dialect.header().ends_with(b"          "));
    }
}

#[test]
fn unknown_header_is_unsupported() {
    let mut data = b"reMarkable .lines file, version=7          ".to_vec();
    data.extend([0; 16]);

    let err = nib::decode(&data).unwrap_err();
    assert_eq!(
        err,
        Error::UnsupportedFormat(UnsupportedFormat {
            header: data[..HEADER_LEN].to_vec()
        })
    );
}

#[test]
fn near_miss_headers_are_unsupported() {
    let upper = HEADER_V6.to_ascii_uppercase();

    let mut unpadded = HEADER_V6.to_vec();
    unpadded[HEADER_LEN - 1] = b'\0';

    let mut shifted = b" ".to_vec();
    shifted.extend(&HEADER_V6[..HEADER_LEN - 1]);

    for data in [upper.to_vec(), unpadded, shifted] {
        assert!(matches!(
            nib::decode(&data),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}

#[test]
fn short_buffer_is_unsupported() {
    let data = &HEADER_V6[..20];

    let err = nib::decode(data).unwrap_err();
    assert_eq!(
        err,
        Error::UnsupportedFormat(UnsupportedFormat {
            header: data.to_vec()
        })
    );

    assert!(matches!(
        nib::decode(&[]),
        Err(Error::UnsupportedFormat(UnsupportedFormat { header })) if header.is_empty()
    ));
}

#[test]
fn unsupported_header_is_displayed_escaped() {
    let err = nib::decode(b"\x00abc").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unsupported format with header \"\\x00abc\"."
    );
}

#[test]
fn bare_v6_header_is_an_empty_document() {
    let document = nib::decode(HEADER_V6).unwrap();
    assert!(document.is_empty());
}

#[test]
fn bare_flat_header_is_corrupt() {
    for dialect in [Dialect::V3, Dialect::V5] {
        let err = nib::decode(&stream::header(dialect)).unwrap_err();

        let Error::CorruptData(err) = err else {
            panic!("expected corrupt data, found {err:?}");
        };
        assert_eq!(err.offset, HEADER_LEN);
        assert!(matches!(err.kind, Corruption::EndOfSlice { needed: 4, remaining: 0 }));
    }
}
