use once_cell::sync::Lazy;
use rayon::prelude::*;

use ngram_segment::{normalize, Search, Segmenter};

macro_rules! assert_segments {
    ($input:expr, $list:expr) => {
        let mut search = Search::default();
        let words = SEGMENTER.segment($input, &mut search).collect::<Vec<_>>();
        assert_eq!(words, $list);
    };
}

#[test]
fn test_segment_0() {
    assert_segments!("universityofwashington", ["university", "of", "washington"]);
}

#[test]
fn test_segment_1() {
    assert_segments!(
        "qqquniversityofwashingtonqqq",
        ["qqq", "university", "of", "washington", "qqq"]
    );
}

#[test]
fn test_segment_2() {
    assert_segments!(
        "universityqqqofwashington",
        ["university", "qqq", "of", "washington"]
    );
}

#[test]
fn test_segment_3() {
    // Neither "he art" nor "grow sold er" beat the longer words
    assert_segments!("theheartgrowsolder", ["the", "heart", "grows", "older"]);
}

#[test]
fn test_segment_4() {
    assert_segments!("MARGARETAREYOU", ["margaret", "are", "you"]);
}

#[test]
fn test_segment_5() {
    assert_segments!("  Margaret's  ", ["margarets"]);
}

#[test]
fn empty() {
    let mut search = Search::default();
    assert_eq!(SEGMENTER.segment("", &mut search).len(), 0);
    assert_eq!(SEGMENTER.segment_opt(None, &mut search).len(), 0);
}

#[test]
fn tokens_cover_normalized_text() {
    let alphabet = "thearGOWsldmyuq'x".chars().collect::<Vec<_>>();
    let mut seed = 0x1234_5678_9abc_def0_u64;
    let mut search = Search::default();
    for _ in 0..500 {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let len = (seed % 24) as usize;
        let input = (0..len)
            .map(|_| {
                seed ^= seed << 13;
                seed ^= seed >> 7;
                seed ^= seed << 17;
                alphabet[(seed % alphabet.len() as u64) as usize]
            })
            .collect::<String>();

        let tokens = SEGMENTER.segment(&input, &mut search).collect::<Vec<_>>();
        assert!(tokens.iter().all(|token| !token.is_empty()), "{:?}", input);
        assert_eq!(tokens.concat(), normalize(&input), "{:?}", input);
    }
}

#[test]
fn shared_between_threads() {
    let inputs = vec![
        "universityofwashington",
        "theheartgrowsolder",
        "margaretareyou",
        "qqqheartqqq",
        "",
    ];

    let sequential = inputs
        .iter()
        .map(|input| {
            let mut search = Search::default();
            let words = SEGMENTER.segment(input, &mut search);
            words.map(str::to_owned).collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    for _ in 0..8 {
        let parallel = inputs
            .par_iter()
            .map_init(Search::default, |search, input| {
                let words = SEGMENTER.segment(input, search);
                words.map(str::to_owned).collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        assert_eq!(parallel, sequential);
    }
}

static SEGMENTER: Lazy<Segmenter> = Lazy::new(|| {
    let unigrams = [
        ("university", 1e8),
        ("of", 1e10),
        ("washington", 1e8),
        ("the", 2.3e10),
        ("he", 2.5e9),
        ("hear", 3e7),
        ("heart", 5e7),
        ("ear", 2e7),
        ("art", 1e8),
        ("grow", 3e7),
        ("grows", 1e7),
        ("row", 2e7),
        ("rows", 5e6),
        ("so", 2e9),
        ("sold", 5e7),
        ("old", 2e8),
        ("older", 4e7),
        ("der", 1e6),
        ("margaret", 2e6),
        ("margarets", 1e5),
        ("mar", 1e6),
        ("are", 3e9),
        ("re", 1e7),
        ("tar", 1e7),
        ("you", 4e9),
    ];
    let bigrams = [
        (("the", "heart"), 2e5),
        (("heart", "grows"), 1e4),
        (("grows", "older"), 2e4),
        (("are", "you"), 3e7),
    ];

    let unigrams = unigrams.iter().map(|&(word, count)| (word.into(), count));
    Segmenter::from_iters(
        2,
        unigrams.clone(),
        unigrams,
        bigrams
            .iter()
            .map(|&((prev, word), count)| ((prev.into(), word.into()), count)),
    )
    .unwrap()
});
