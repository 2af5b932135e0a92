use num_bigint::{BigInt, BigUint};

use npuzzle::{Board, PersistError, SavedGame, SAVE_MAGIC, SAVE_VERSION};

fn to_bytes(saved: &SavedGame) -> Vec<u8> {
    let mut buf = Vec::new();
    saved.write_to(&mut buf).unwrap();
    buf
}

fn from_bytes(bytes: &[u8]) -> Result<SavedGame, PersistError> {
    SavedGame::read_from(&mut &bytes[..])
}

#[test]
fn round_trips_through_a_byte_buffer() {
    let board = Board::from_rank(4, 4, &BigUint::from(123_456_789u64));
    let saved = SavedGame::from_board(&board, "puzzles/cat.png".to_string(), 42, 1_234_567);
    let restored = from_bytes(&to_bytes(&saved)).unwrap();
    assert_eq!(restored, saved);
    assert_eq!(restored.board().unwrap(), board);
}

#[test]
fn golden_byte_layout() {
    let saved = SavedGame {
        width: 2,
        height: 2,
        image_path: "img".to_string(),
        moves: 5,
        elapsed_ticks: 7,
        rank: BigInt::from(3),
    };
    let bytes = to_bytes(&saved);
    let expected: Vec<u8> = vec![
        0x4D, 0x50, 0x53, 0x47, // magic, "MPSG" on disk
        0x01, 0x00, 0x00, 0x00, // version
        0x02, 0x00, 0x00, 0x00, // width
        0x02, 0x00, 0x00, 0x00, // height
        0x03, b'i', b'm', b'g', // length-prefixed path
        0x05, 0x00, 0x00, 0x00, // moves
        0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // elapsed ticks
        0x03, // rank, signed little-endian
    ];
    assert_eq!(bytes, expected);
}

#[test]
fn long_paths_use_multibyte_length_prefix() {
    let path = "x".repeat(200);
    let board = Board::solved(3, 3);
    let saved = SavedGame::from_board(&board, path.clone(), 0, 0);
    let bytes = to_bytes(&saved);
    // 200 = 0b1_1001000: low group with the continuation bit, then 1.
    assert_eq!(&bytes[16..18], &[0xC8, 0x01]);
    assert_eq!(from_bytes(&bytes).unwrap().image_path, path);
}

#[test]
fn rejects_bad_magic() {
    let mut bytes = to_bytes(&SavedGame::from_board(&Board::solved(2, 2), String::new(), 0, 0));
    bytes[0] ^= 0xFF;
    assert!(matches!(from_bytes(&bytes), Err(PersistError::Format(_))));
}

#[test]
fn rejects_unknown_version() {
    let mut bytes = to_bytes(&SavedGame::from_board(&Board::solved(2, 2), String::new(), 0, 0));
    bytes[4] = 9;
    assert!(matches!(from_bytes(&bytes), Err(PersistError::Format(_))));
}

#[test]
fn rejects_truncated_streams() {
    let bytes = to_bytes(&SavedGame::from_board(&Board::solved(2, 2), "a".to_string(), 0, 0));
    for cut in [2, 6, 13, 17, 20] {
        assert!(
            matches!(from_bytes(&bytes[..cut]), Err(PersistError::Format(_))),
            "cut at {cut}"
        );
    }
}

#[test]
fn rejects_out_of_range_ranks() {
    let negative = SavedGame {
        width: 3,
        height: 3,
        image_path: String::new(),
        moves: 0,
        elapsed_ticks: 0,
        rank: BigInt::from(-1),
    };
    assert!(matches!(negative.board(), Err(PersistError::Format(_))));

    let too_large = SavedGame {
        rank: BigInt::from(362_880u32), // 9!
        ..negative
    };
    assert!(matches!(too_large.board(), Err(PersistError::Format(_))));

    let degenerate = SavedGame {
        width: 1,
        height: 9,
        rank: BigInt::from(0),
        ..too_large
    };
    assert!(matches!(degenerate.board(), Err(PersistError::Format(_))));
}

#[test]
fn magic_constants_match_the_wire_tag() {
    assert_eq!(SAVE_MAGIC.to_le_bytes(), *b"MPSG");
    assert_eq!(SAVE_VERSION, 1);
}
