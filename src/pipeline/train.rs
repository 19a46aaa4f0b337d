// Training loop: build the vocabulary once, then run shuffled passes.
//
// The corpus itself is never reordered; each pass trains over a shuffled copy
// of the document list so lookups keep seeing corpus order.

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use crate::corpus::Corpus;
use crate::embedding::{DocumentEmbedder, PassStats};
use crate::error::{DocsimError, Result};

/// Summary of a full training run.
#[derive(Debug, Clone, Default)]
pub struct TrainingReport {
    pub passes: Vec<PassStats>,
}

impl TrainingReport {
    pub fn words_trained(&self) -> usize {
        self.passes.iter().map(|p| p.words_trained).sum()
    }
}

/// Build the vocabulary from `corpus` and train for `passes` shuffled passes.
///
/// `seed` drives only the shuffling; the model has its own seed.
pub fn train_model<E: DocumentEmbedder>(
    model: &mut E,
    corpus: &Corpus,
    passes: usize,
    seed: u64,
    show_progress: bool,
) -> Result<TrainingReport> {
    if corpus.is_empty() {
        return Err(DocsimError::EmptyCorpus);
    }

    model.build_vocab(corpus.documents())?;

    let mut doc_list = corpus.documents().to_vec();
    let mut rng = StdRng::seed_from_u64(seed);

    let pb = if show_progress {
        let pb = ProgressBar::new(passes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Training [{bar:30}] {pos}/{len} passes ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut report = TrainingReport::default();
    for _ in 0..passes {
        doc_list.shuffle(&mut rng);
        report.passes.push(model.train(&doc_list)?);
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        passes = passes,
        documents = corpus.len(),
        words_trained = report.words_trained(),
        "Training complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::LabeledDocument;

    /// Records the order of every pass instead of learning anything.
    #[derive(Default)]
    struct RecordingEmbedder {
        vocab_docs: usize,
        orders: Vec<Vec<String>>,
    }

    impl DocumentEmbedder for RecordingEmbedder {
        fn build_vocab(&mut self, documents: &[LabeledDocument]) -> Result<()> {
            self.vocab_docs = documents.len();
            Ok(())
        }

        fn train(&mut self, documents: &[LabeledDocument]) -> Result<PassStats> {
            self.orders
                .push(documents.iter().map(|d| d.tag.clone()).collect());
            Ok(PassStats {
                words_trained: documents.iter().map(|d| d.words.len()).sum(),
                alpha: 0.025,
            })
        }

        fn most_similar(&self, _tag: &str, _top_n: usize) -> Result<Vec<(String, f32)>> {
            Ok(Vec::new())
        }
    }

    fn corpus() -> Corpus {
        Corpus::new(
            (0..8)
                .map(|i| LabeledDocument::new(vec![format!("w{i}")], format!("T_{i}")))
                .collect(),
        )
    }

    #[test]
    fn test_runs_requested_passes_over_every_document() {
        let mut model = RecordingEmbedder::default();
        let report = train_model(&mut model, &corpus(), 5, 3, false).unwrap();

        assert_eq!(model.vocab_docs, 8);
        assert_eq!(model.orders.len(), 5);
        assert_eq!(report.passes.len(), 5);
        assert_eq!(report.words_trained(), 40);
        for order in &model.orders {
            let mut sorted = order.clone();
            sorted.sort();
            let mut expected: Vec<String> = (0..8).map(|i| format!("T_{i}")).collect();
            expected.sort();
            assert_eq!(sorted, expected);
        }
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let mut a = RecordingEmbedder::default();
        let mut b = RecordingEmbedder::default();
        train_model(&mut a, &corpus(), 3, 11, false).unwrap();
        train_model(&mut b, &corpus(), 3, 11, false).unwrap();
        assert_eq!(a.orders, b.orders);
    }

    #[test]
    fn test_corpus_order_untouched() {
        let corpus = corpus();
        let mut model = RecordingEmbedder::default();
        train_model(&mut model, &corpus, 4, 9, false).unwrap();
        assert_eq!(corpus.documents()[0].tag, "T_0");
        assert_eq!(corpus.documents()[7].tag, "T_7");
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let mut model = RecordingEmbedder::default();
        let err = train_model(&mut model, &Corpus::default(), 2, 1, false).unwrap_err();
        assert!(matches!(err, DocsimError::EmptyCorpus));
    }
}
