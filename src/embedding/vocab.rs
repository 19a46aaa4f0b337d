// Vocabulary: word counts, down-sampling, and the negative-sampling table.
//
// Down-sampling follows word2vec: a word seen `c` times out of `n` retained
// words is kept with probability (sqrt(c / t) + 1) * t / c, where
// t = sample * n, capped at 1.0. Noise words are drawn from the unigram
// distribution raised to the 3/4 power.

use std::collections::HashMap;

use rand::Rng;

use crate::corpus::LabeledDocument;

/// Exponent applied to word counts for the noise distribution.
const NEGATIVE_POWER: f64 = 0.75;

/// Upper bound of the cumulative table.
const TABLE_DOMAIN: f64 = i32::MAX as f64;

#[derive(Debug, Clone)]
pub struct VocabWord {
    pub word: String,
    pub count: u32,
    /// Probability that an occurrence survives down-sampling
    pub keep_probability: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<VocabWord>,
    index: HashMap<String, usize>,
    retained_total: u64,
    cum_table: Vec<u32>,
}

impl Vocabulary {
    /// Count every token in `documents` and keep words seen at least
    /// `min_count` times. Words are ordered by descending count, then
    /// alphabetically, so indices are stable across runs.
    pub fn build(documents: &[LabeledDocument], min_count: u32, sample: f64) -> Self {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for doc in documents {
            for word in &doc.words {
                *counts.entry(word.as_str()).or_insert(0) += 1;
            }
        }

        let mut retained: Vec<(&str, u32)> = counts
            .into_iter()
            .filter(|&(_, c)| c >= min_count)
            .collect();
        retained.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let retained_total: u64 = retained.iter().map(|&(_, c)| c as u64).sum();
        let threshold = sample * retained_total as f64;

        let words: Vec<VocabWord> = retained
            .into_iter()
            .map(|(word, count)| VocabWord {
                word: word.to_string(),
                count,
                keep_probability: keep_probability(count, threshold),
            })
            .collect();

        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.word.clone(), i))
            .collect();
        let cum_table = cumulative_table(&words);

        Self {
            words,
            index,
            retained_total,
            cum_table,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Total occurrences of all retained words.
    pub fn retained_total(&self) -> u64 {
        self.retained_total
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn word(&self, index: usize) -> Option<&VocabWord> {
        self.words.get(index)
    }

    /// Indices of `words` that survive one round of down-sampling. Unknown
    /// words are skipped.
    pub fn sampled_indices<R: Rng>(&self, words: &[String], rng: &mut R) -> Vec<usize> {
        words
            .iter()
            .filter_map(|w| self.index_of(w))
            .filter(|&i| {
                let keep = self.words[i].keep_probability;
                keep >= 1.0 || keep >= rng.random::<f32>()
            })
            .collect()
    }

    /// Draw a noise word index from the unigram^0.75 distribution.
    ///
    /// Returns `None` when the vocabulary is empty.
    pub fn sample_negative<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        let last = *self.cum_table.last()?;
        if last == 0 {
            return None;
        }
        let draw = rng.random_range(0..last);
        let index = self.cum_table.partition_point(|&c| c <= draw);
        Some(index.min(self.words.len() - 1))
    }
}

fn keep_probability(count: u32, threshold: f64) -> f32 {
    if threshold <= 0.0 || count == 0 {
        return 1.0;
    }
    let c = count as f64;
    (((c / threshold).sqrt() + 1.0) * (threshold / c)).min(1.0) as f32
}

fn cumulative_table(words: &[VocabWord]) -> Vec<u32> {
    let total_pow: f64 = words
        .iter()
        .map(|w| (w.count as f64).powf(NEGATIVE_POWER))
        .sum();
    if total_pow == 0.0 {
        return Vec::new();
    }

    let mut cumulative = 0.0;
    words
        .iter()
        .map(|w| {
            cumulative += (w.count as f64).powf(NEGATIVE_POWER);
            (cumulative / total_pow * TABLE_DOMAIN).round() as u32
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn doc(text: &str, tag: &str) -> LabeledDocument {
        LabeledDocument::new(text.split_whitespace().map(str::to_string).collect(), tag)
    }

    fn docs() -> Vec<LabeledDocument> {
        vec![
            doc("apple banana apple", "A_0"),
            doc("banana cherry apple", "A_1"),
        ]
    }

    #[test]
    fn test_build_orders_by_count() {
        let vocab = Vocabulary::build(&docs(), 1, 0.0);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.word(0).unwrap().word, "apple");
        assert_eq!(vocab.word(0).unwrap().count, 3);
        assert_eq!(vocab.word(1).unwrap().word, "banana");
        assert_eq!(vocab.word(2).unwrap().word, "cherry");
        assert_eq!(vocab.retained_total(), 6);
    }

    #[test]
    fn test_min_count_filters() {
        let vocab = Vocabulary::build(&docs(), 2, 0.0);
        assert_eq!(vocab.len(), 2);
        assert!(vocab.index_of("cherry").is_none());
        assert_eq!(vocab.retained_total(), 5);
    }

    #[test]
    fn test_no_sampling_keeps_everything() {
        let vocab = Vocabulary::build(&docs(), 1, 0.0);
        let mut rng = StdRng::seed_from_u64(7);
        let words: Vec<String> = ["apple", "banana", "unknown"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(vocab.sampled_indices(&words, &mut rng), vec![0, 1]);
    }

    #[test]
    fn test_keep_probability_shrinks_for_frequent_words() {
        let rare = keep_probability(1, 0.5);
        let common = keep_probability(1000, 0.5);
        assert!(common < rare);
        assert!(rare <= 1.0);
        assert_eq!(keep_probability(10, 0.0), 1.0);
    }

    #[test]
    fn test_negative_sampling_favours_frequent_words() {
        let vocab = Vocabulary::build(&docs(), 1, 0.0);
        let mut rng = StdRng::seed_from_u64(42);
        let mut hits = [0usize; 3];
        for _ in 0..3000 {
            hits[vocab.sample_negative(&mut rng).unwrap()] += 1;
        }
        assert!(hits[0] > hits[2], "apple should be drawn more than cherry: {hits:?}");
        assert!(hits.iter().all(|&h| h > 0));
    }

    #[test]
    fn test_empty_vocabulary_has_no_negatives() {
        let vocab = Vocabulary::build(&[doc("", "E_0")], 1, 0.0);
        assert!(vocab.is_empty());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(vocab.sample_negative(&mut rng).is_none());
    }
}
