//! Reading word frequency tables
//!
//! Each table is a text file with one `key<TAB>count` entry per line. Unigram keys are
//! single words; bigram keys are two words separated by a single space. Keys are trimmed
//! and lowercased, blank lines and lines that do not have exactly two columns are skipped.
//! Files with a `.zst` extension are decompressed on the fly.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use smartstring::alias::String;

use crate::{Error, HashMap, Result};

/// Find the table called `name` in `dir`, preferring the compressed version
pub fn locate(dir: &Path, name: &str) -> PathBuf {
    let compressed = dir.join(format!("{}.zst", name));
    match compressed.is_file() {
        true => compressed,
        false => dir.join(name),
    }
}

/// Open `path` for reading, decompressing it if it ends in `.zst`
pub fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    Ok(match path.extension().map_or(false, |ext| ext == "zst") {
        true => Box::new(BufReader::new(
            zstd::Decoder::new(file).map_err(|e| io_error(path, e))?,
        )),
        false => Box::new(BufReader::new(file)),
    })
}

/// Load a unigram table from `path`, failing if it holds no entries
pub fn load_unigrams(path: &Path) -> Result<HashMap<String, f64>> {
    let unigrams = read_unigrams(open(path)?, path)?;
    debug!("loaded {} unigrams from {}", unigrams.len(), path.display());
    match unigrams.is_empty() {
        true => Err(Error::EmptyTable(path.to_owned())),
        false => Ok(unigrams),
    }
}

/// Load a bigram table from `path`, failing if it holds no entries
pub fn load_bigrams(path: &Path) -> Result<HashMap<(String, String), f64>> {
    let bigrams = read_bigrams(open(path)?, path)?;
    debug!("loaded {} bigrams from {}", bigrams.len(), path.display());
    match bigrams.is_empty() {
        true => Err(Error::EmptyTable(path.to_owned())),
        false => Ok(bigrams),
    }
}

/// Read unigram counts from `reader`; `path` is only used in error messages
pub fn read_unigrams(reader: impl BufRead, path: &Path) -> Result<HashMap<String, f64>> {
    let mut unigrams = HashMap::default();
    read_entries(reader, path, |word, count| {
        unigrams.insert(word.into(), count);
    })?;
    Ok(unigrams)
}

/// Read bigram counts from `reader`; `path` is only used in error messages
///
/// Keys without a space are skipped.
pub fn read_bigrams(reader: impl BufRead, path: &Path) -> Result<HashMap<(String, String), f64>> {
    let mut bigrams = HashMap::default();
    read_entries(reader, path, |key, count| {
        if let Some(split) = key.find(' ') {
            let (prev, word) = (&key[..split], key[split + 1..].trim_start());
            bigrams.insert((prev.into(), word.into()), count);
        }
    })?;
    Ok(bigrams)
}

fn read_entries(
    mut reader: impl BufRead,
    path: &Path,
    mut insert: impl FnMut(&str, f64),
) -> Result<()> {
    let mut ln = std::string::String::new();
    let mut i = 0;
    loop {
        ln.clear();
        match reader.read_line(&mut ln) {
            Ok(0) => break,
            Ok(_) => i += 1,
            Err(source) => return Err(io_error(path, source)),
        }

        let line = ln.trim_end_matches(&['\n', '\r'][..]);
        if line.trim().is_empty() {
            continue;
        }

        let mut columns = line.split('\t');
        let (key, count) = match (columns.next(), columns.next(), columns.next()) {
            (Some(key), Some(count), None) => (key, count),
            _ => {
                debug!("skipping malformed line {}:{}", path.display(), i);
                continue;
            }
        };

        let count = u64::from_str(count.trim()).map_err(|e| Error::Parse {
            path: path.to_owned(),
            line: i,
            message: format!("invalid count {:?}: {}", count, e),
        })?;

        insert(&key.trim().to_lowercase(), count as f64);
    }

    Ok(())
}

fn io_error(path: &Path, source: io::Error) -> Error {
    Error::Io {
        path: path.to_owned(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn path() -> PathBuf {
        PathBuf::from("test.txt")
    }

    #[test]
    fn unigrams() {
        let data = "the\t23135851162\n\nOf \t13151942776\r\nbroken line\nx\t1\t2\n";
        let unigrams = read_unigrams(Cursor::new(data), &path()).unwrap();
        assert_eq!(unigrams.len(), 2);
        assert_eq!(unigrams.get("the"), Some(&23135851162.0));
        assert_eq!(unigrams.get("of"), Some(&13151942776.0));
    }

    #[test]
    fn bigrams() {
        let data = "of the\t2766332391\nnospace\t12\nIn A\t5\n";
        let bigrams = read_bigrams(Cursor::new(data), &path()).unwrap();
        assert_eq!(bigrams.len(), 2);
        assert_eq!(bigrams.get(&(String::from("of"), String::from("the"))), Some(&2766332391.0));
        assert_eq!(bigrams.get(&(String::from("in"), String::from("a"))), Some(&5.0));
    }

    #[test]
    fn invalid_count() {
        let data = "the\t100\nof\tmany\n";
        match read_unigrams(Cursor::new(data), &path()) {
            Err(Error::Parse { line: 2, .. }) => {}
            _ => panic!("expected parse error on line 2"),
        }
    }

    #[test]
    fn missing_file() {
        let dir = std::env::temp_dir().join("ngram-segment-missing");
        match load_unigrams(&locate(&dir, "unigrams.txt")) {
            Err(Error::Io { path, .. }) => assert_eq!(path, dir.join("unigrams.txt")),
            _ => panic!("expected io error"),
        }
    }

    #[test]
    fn compressed_tables() {
        let dir = std::env::temp_dir().join(format!("ngram-segment-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let plain = "university\t100\nof\t1000\nwashington\t100\n";
        let compressed = zstd::encode_all(plain.as_bytes(), 3).unwrap();
        std::fs::write(dir.join("unigrams.txt.zst"), compressed).unwrap();
        std::fs::write(dir.join("unigrams-full.txt"), plain).unwrap();
        std::fs::write(dir.join("bigrams.txt"), "of washington\t10\n").unwrap();

        assert_eq!(locate(&dir, "unigrams.txt"), dir.join("unigrams.txt.zst"));
        assert_eq!(load_unigrams(&locate(&dir, "unigrams.txt")).unwrap().len(), 3);

        let segmenter = crate::Segmenter::from_dir(2, &dir).unwrap();
        let mut search = crate::Search::default();
        let words = segmenter
            .segment("universityofwashington", &mut search)
            .collect::<Vec<_>>();
        assert_eq!(words, vec!["university", "of", "washington"]);

        std::fs::write(dir.join("bigrams.txt"), "\n\n").unwrap();
        match crate::Segmenter::from_dir(2, &dir) {
            Err(Error::EmptyTable(path)) => assert_eq!(path, dir.join("bigrams.txt")),
            _ => panic!("expected empty table error"),
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
