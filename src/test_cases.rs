use crate::{Search, Segmenter};

/// Run a segmenter against the built-in test cases
pub fn run(segmenter: &Segmenter) {
    let mut search = Search::default();
    assert_eq!(segmenter.segment("", &mut search).len(), 0);
    assert_eq!(segmenter.segment_opt(None, &mut search).len(), 0);

    let mut success = true;
    for &(input, expected) in TEST_CASES.iter() {
        success &= assert_segments(input, expected, &mut search, segmenter);
    }

    for &(input, expected) in FAILED.iter() {
        success &= assert_segments(input, expected, &mut search, segmenter);
    }

    assert!(success);
}

pub fn assert_segments(
    input: &str,
    expected: &[&str],
    search: &mut Search,
    segmenter: &Segmenter,
) -> bool {
    let cmp = segmenter.segment(input, search).collect::<Vec<_>>();
    let success = cmp == expected;
    if !success {
        println!("input:    {:?}", input);
        println!("expected: {:?}", expected);
        println!("actual:   {:?}\n", cmp);
    }
    success
}

/// Built-in test cases, as pairs of raw input and expected tokens
///
/// These are exposed so that you can test with different data sources.
pub const TEST_CASES: &[(&str, &[&str])] = &[
    ("universityofwashington", &["university", "of", "washington"]),
    (
        "qqquniversityofwashingtonqqq",
        &["qqq", "university", "of", "washington", "qqq"],
    ),
    (
        "universityqqqofwashington",
        &["university", "qqq", "of", "washington"],
    ),
    ("theheartgrowsolder", &["the", "heart", "grows", "older"]),
    ("MARGARETAREYOU", &["margaret", "are", "you"]),
];

/// Long input whose expected tokens include the wrong splits the reference tables produce
///
/// These are asserted like the other cases, so any change in the output is noticed.
pub const FAILED: &[(&str, &[&str])] = &[(
    "MARGARETAREYOUGRIEVINGOVERGOLDENGROVEUNLEAVINGLEAVESLIKETHETHINGSOFMANYOUWITHYOURFRESH\
     THOUGHTSCAREFORCANYOUAHASTHEHEARTGROWSOLDERITWILLCOMETOSUCHSIGHTSCOLDERBYANDBYNORSPARE\
     ASIGHTHOUGHWORLDSOFWANWOODLEAFMEALLIEANDYETYOUWILLWEEPANDKNOWWHYNOWNOMATTERCHILDTHE\
     NAMESORROWSSPRINGSARETHESAMENORMOUTHHADNONORMINDEXPRESSEDWHATHEARTHEARDOFGHOSTGUESSED\
     ITISTHEBLIGHTMANWASBORNFORITISMARGARETYOUMOURNFOR",
    &[
        // Expected to split "unleaving", "wanwood" and "leafmeal", and to read "he art heard"
        "margaret", "are", "you", "grieving", "over", "golden", "grove", "un", "leaving",
        "leaves", "like", "the", "things", "of", "man", "you", "with", "your", "fresh",
        "thoughts", "care", "for", "can", "you", "a", "has", "the", "heart", "grows", "older",
        "it", "will", "come", "to", "such", "sights", "colder", "by", "and", "by", "nor",
        "spare", "a", "sigh", "though", "worlds", "of", "wan", "wood", "leaf", "me", "allie",
        "and", "yet", "you", "will", "weep", "and", "know", "why", "now", "no", "matter",
        "child", "the", "name", "sorrows", "springs", "are", "the", "same", "nor", "mouth",
        "had", "non", "or", "mind", "expressed", "what", "he", "art", "heard", "of", "ghost",
        "guessed", "it", "is", "the", "blight", "man", "was", "born", "for", "it", "is",
        "margaret", "you", "mourn", "for",
    ],
)];
