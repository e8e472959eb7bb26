use ngram_segment::{HashMap, Search, Segmenter};

fn main() {
    let mut unigrams = HashMap::default();

    unigrams.insert("the".into(), 23_000_000_000.0);
    unigrams.insert("he".into(), 2_500_000_000.0);
    unigrams.insert("heart".into(), 300_000.0);
    unigrams.insert("art".into(), 100_000_000.0);

    let mut bigrams = HashMap::default();
    bigrams.insert(("he".into(), "art".into()), 1_000_000.0);

    let segmenter = Segmenter::from_maps(2, unigrams.clone(), unigrams, bigrams).unwrap();
    let mut search = Search::default();

    let words = segmenter.segment("theheart", &mut search);

    println!("{:?}", words.collect::<Vec<&str>>());
}
