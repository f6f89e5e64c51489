use mono_parser_core::{Action, Color, OutputParser, SgrAttribute};
use pretty_assertions::assert_eq;

use crate::{actions, coalesce};

const CORPUS: &[&str] = &[
    "plain text only",
    "\x1b[1;31mred\x1b[0m normal\r\n",
    "\x1b[38;2;10;20;30mtrue\x1b[48:5:200mcolor",
    "\x1b]0;title\x07\x1b]8;id=1;https://example.com\x1b\\link\x1b]8;;\x1b\\",
    "\x1bP$qm\x1b\\\x1bP+q544e\x1b\\",
    "\x1b(0lqk\x1b(B\x1b#8\x1b7\x1b8",
    "a\x1b[2\x08J\tb\x1b[?1049h\x1b[?25l",
    "grüße 🦀\x1b[5;10H❤",
    "\x1b]52;c;aGVsbG8=\x07\x1b[!p\x1b[ q",
    "\x1b[1\x18x\x1b]2;abort\x1a\x1b[A",
];

fn parse_chunks(chunks: &[&str]) -> Vec<Action> {
    let mut parser = OutputParser::new();
    let mut result = Vec::new();
    for chunk in chunks {
        result.extend(parser.parse(chunk));
    }
    coalesce(result)
}

#[test]
fn test_every_two_way_split() {
    for input in CORPUS {
        let expected = coalesce(actions(input));
        for (split, _) in input.char_indices().skip(1) {
            let (head, tail) = input.split_at(split);
            assert_eq!(parse_chunks(&[head, tail]), expected, "{input:?} split at {split}");
        }
    }
}

#[test]
fn test_char_by_char() {
    for input in CORPUS {
        let expected = coalesce(actions(input));
        let chars: Vec<String> = input.chars().map(String::from).collect();
        let chunks: Vec<&str> = chars.iter().map(String::as_str).collect();
        assert_eq!(parse_chunks(&chunks), expected, "{input:?}");
    }
}

#[test]
fn test_random_splits() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_1234);
    let input: String = CORPUS.concat();
    let expected = coalesce(actions(&input));
    let boundaries: Vec<usize> = input.char_indices().map(|(idx, _)| idx).collect();

    for _ in 0..200 {
        let mut cuts: Vec<usize> = (0..rng.usize(1..12)).map(|_| boundaries[rng.usize(..boundaries.len())]).collect();
        cuts.push(0);
        cuts.push(input.len());
        cuts.sort_unstable();
        cuts.dedup();

        let chunks: Vec<&str> = cuts.windows(2).map(|w| &input[w[0]..w[1]]).collect();
        assert_eq!(parse_chunks(&chunks), expected, "cuts {cuts:?}");
    }
}

#[test]
fn test_sgr_split_after_parameters() {
    let mut parser = OutputParser::new();
    assert!(parser.parse("\x1b[38;5;12").is_empty());
    assert!(parser.is_in_escape_sequence());
    assert_eq!(
        parser.parse("mX"),
        vec![
            Action::SelectGraphicRendition(SgrAttribute::Foreground(Color::Extended(12))),
            Action::Print("X".to_string()),
        ]
    );
}
