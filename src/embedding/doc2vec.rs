// Paragraph-vector model trained with negative sampling.
//
// Each tag gets a document vector. In DM mode the mean of the document vector
// and the surrounding word vectors is trained to predict the centre word; in
// DBOW mode the document vector alone predicts every word of its document.
// Output weights start at zero and input vectors at small random values, as
// in word2vec.
//
// Everything runs on one thread with a seeded RNG, so a fixed seed and a fixed
// document order reproduce the same vectors.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::params::{ModelParams, TrainingMode};
use super::similarity::{cosine_similarity, top_n};
use super::traits::{DocumentEmbedder, PassStats};
use super::vocab::Vocabulary;
use crate::corpus::LabeledDocument;
use crate::error::{DocsimError, Result};

pub struct Doc2Vec {
    params: ModelParams,
    vocab: Vocabulary,
    /// Input word vectors, `vocab.len() * vector_size`
    word_vectors: Vec<f32>,
    /// One row per tag, `doc_tags.len() * vector_size`
    doc_vectors: Vec<f32>,
    /// Negative-sampling output weights, `vocab.len() * vector_size`
    output_weights: Vec<f32>,
    doc_tags: Vec<String>,
    doc_index: HashMap<String, usize>,
    rng: StdRng,
    passes_done: usize,
    built: bool,
}

impl Doc2Vec {
    pub fn new(params: ModelParams) -> Self {
        let rng = StdRng::seed_from_u64(params.seed);
        Self {
            params,
            vocab: Vocabulary::default(),
            word_vectors: Vec::new(),
            doc_vectors: Vec::new(),
            output_weights: Vec::new(),
            doc_tags: Vec::new(),
            doc_index: HashMap::new(),
            rng,
            passes_done: 0,
            built: false,
        }
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn passes_done(&self) -> usize {
        self.passes_done
    }

    pub fn doc_count(&self) -> usize {
        self.doc_tags.len()
    }

    /// Trained vector for a tag.
    pub fn doc_vector(&self, tag: &str) -> Option<&[f32]> {
        let dim = self.params.vector_size;
        self.doc_index
            .get(tag)
            .map(|&slot| &self.doc_vectors[slot * dim..(slot + 1) * dim])
    }

    /// Train a vector for unseen tokens against the frozen model.
    ///
    /// Word vectors and output weights are left untouched. The RNG is seeded
    /// from the model seed and the tokens, so the same input infers the same
    /// vector. Fails with `UnknownWords` when no token is in the vocabulary,
    /// since nothing would move the vector off its random start.
    pub fn infer_vector(&self, words: &[String], epochs: usize) -> Result<Vec<f32>> {
        if !self.built {
            return Err(DocsimError::NotTrained);
        }
        if !words.iter().any(|w| self.vocab.index_of(w).is_some()) {
            return Err(DocsimError::UnknownWords(words.join(" ")));
        }

        let dim = self.params.vector_size;
        let mut rng = StdRng::seed_from_u64(self.params.seed ^ token_seed(words));

        let mut vector = random_matrix(&mut rng, 1, dim);
        let mut words_in = Weights::Frozen(&self.word_vectors);
        let mut output = Weights::Frozen(&self.output_weights);

        let epochs = epochs.max(1);
        let schedule = ModelParams {
            passes: epochs,
            ..self.params.clone()
        };
        for epoch in 0..epochs {
            let alpha = schedule.alpha_for_pass(epoch);
            let ids = self.vocab.sampled_indices(words, &mut rng);
            train_document(
                &self.params,
                &self.vocab,
                &ids,
                &mut vector,
                &mut words_in,
                &mut output,
                alpha,
                &mut rng,
            );
        }

        Ok(vector)
    }

    /// Rank every document against an arbitrary vector, best first.
    pub fn most_similar_to_vector(&self, vector: &[f32], n: usize) -> Vec<(String, f32)> {
        let dim = self.params.vector_size;
        let scored = self
            .doc_tags
            .iter()
            .enumerate()
            .map(|(slot, tag)| {
                let row = &self.doc_vectors[slot * dim..(slot + 1) * dim];
                (tag.clone(), cosine_similarity(vector, row))
            })
            .collect();
        top_n(scored, n)
    }
}

impl DocumentEmbedder for Doc2Vec {
    fn build_vocab(&mut self, documents: &[LabeledDocument]) -> Result<()> {
        if documents.is_empty() {
            return Err(DocsimError::EmptyCorpus);
        }

        let dim = self.params.vector_size;
        self.rng = StdRng::seed_from_u64(self.params.seed);
        self.vocab = Vocabulary::build(documents, self.params.min_count, self.params.sample);

        self.doc_tags.clear();
        self.doc_index.clear();
        for doc in documents {
            if !self.doc_index.contains_key(&doc.tag) {
                self.doc_index.insert(doc.tag.clone(), self.doc_tags.len());
                self.doc_tags.push(doc.tag.clone());
            }
        }

        self.word_vectors = random_matrix(&mut self.rng, self.vocab.len(), dim);
        self.doc_vectors = random_matrix(&mut self.rng, self.doc_tags.len(), dim);
        self.output_weights = vec![0.0; self.vocab.len() * dim];
        self.passes_done = 0;
        self.built = true;

        info!(
            words = self.vocab.len(),
            retained = self.vocab.retained_total(),
            documents = self.doc_tags.len(),
            mode = %self.params.mode,
            "Built vocabulary"
        );
        Ok(())
    }

    fn train(&mut self, documents: &[LabeledDocument]) -> Result<PassStats> {
        if !self.built {
            return Err(DocsimError::NotTrained);
        }

        let alpha = self.params.alpha_for_pass(self.passes_done);
        let dim = self.params.vector_size;
        let Self {
            params,
            vocab,
            word_vectors,
            doc_vectors,
            output_weights,
            doc_index,
            rng,
            ..
        } = self;

        // Resolve every tag up front so an unknown one leaves the model as it was.
        let slots = documents
            .iter()
            .map(|doc| {
                doc_index
                    .get(&doc.tag)
                    .copied()
                    .ok_or_else(|| DocsimError::TagNotFound(doc.tag.clone()))
            })
            .collect::<Result<Vec<usize>>>()?;

        let mut words_in = Weights::Learn(word_vectors.as_mut_slice());
        let mut output = Weights::Learn(output_weights.as_mut_slice());
        let mut words_trained = 0;

        for (doc, slot) in documents.iter().zip(slots) {
            let ids = vocab.sampled_indices(&doc.words, rng);
            let doc_vector = &mut doc_vectors[slot * dim..(slot + 1) * dim];
            words_trained += train_document(
                params,
                vocab,
                &ids,
                doc_vector,
                &mut words_in,
                &mut output,
                alpha,
                rng,
            );
        }

        self.passes_done += 1;
        debug!(
            pass = self.passes_done,
            alpha = alpha,
            words = words_trained,
            "Training pass complete"
        );
        Ok(PassStats {
            words_trained,
            alpha,
        })
    }

    fn most_similar(&self, tag: &str, n: usize) -> Result<Vec<(String, f32)>> {
        if !self.built {
            return Err(DocsimError::NotTrained);
        }

        let query = self
            .doc_vector(tag)
            .ok_or_else(|| DocsimError::TagNotFound(tag.to_string()))?;

        let mut ranked = self.most_similar_to_vector(query, n.saturating_add(1));
        ranked.retain(|(t, _)| t != tag);
        ranked.truncate(n);
        Ok(ranked)
    }
}

/// A weight matrix that is either updated in place or read-only.
enum Weights<'a> {
    Learn(&'a mut [f32]),
    Frozen(&'a [f32]),
}

impl Weights<'_> {
    fn row(&self, index: usize, dim: usize) -> &[f32] {
        let start = index * dim;
        match self {
            Weights::Learn(w) => &w[start..start + dim],
            Weights::Frozen(w) => &w[start..start + dim],
        }
    }

    fn add_scaled(&mut self, index: usize, dim: usize, scale: f32, delta: &[f32]) {
        if let Weights::Learn(w) = self {
            let start = index * dim;
            add_scaled(&mut w[start..start + dim], scale, delta);
        }
    }
}

/// Train one document's vector over its (already down-sampled) word ids.
/// Returns how many words produced an update.
#[allow(clippy::too_many_arguments)]
fn train_document(
    params: &ModelParams,
    vocab: &Vocabulary,
    word_ids: &[usize],
    doc_vector: &mut [f32],
    words_in: &mut Weights<'_>,
    output: &mut Weights<'_>,
    alpha: f32,
    rng: &mut StdRng,
) -> usize {
    let dim = params.vector_size;
    let mut hidden = vec![0.0_f32; dim];
    let mut error = vec![0.0_f32; dim];

    for (pos, &target) in word_ids.iter().enumerate() {
        error.fill(0.0);
        hidden.copy_from_slice(doc_vector);

        match params.mode {
            TrainingMode::Dbow => {
                negative_step(
                    &hidden,
                    target,
                    alpha,
                    params.negative,
                    vocab,
                    output,
                    rng,
                    &mut error,
                );
                add_scaled(doc_vector, 1.0, &error);
            }
            TrainingMode::Dm => {
                // Reduced window: reach is uniform in 1..=window.
                let reach = if params.window > 0 {
                    params.window - rng.random_range(0..params.window)
                } else {
                    0
                };
                let start = pos.saturating_sub(reach);
                let end = (pos + reach + 1).min(word_ids.len());
                let context: Vec<usize> = (start..end)
                    .filter(|&p| p != pos)
                    .map(|p| word_ids[p])
                    .collect();

                for &word in &context {
                    add_scaled(&mut hidden, 1.0, words_in.row(word, dim));
                }
                let scale = 1.0 / (context.len() + 1) as f32;
                hidden.iter_mut().for_each(|h| *h *= scale);

                negative_step(
                    &hidden,
                    target,
                    alpha,
                    params.negative,
                    vocab,
                    output,
                    rng,
                    &mut error,
                );
                add_scaled(doc_vector, 1.0, &error);
                for &word in &context {
                    words_in.add_scaled(word, dim, 1.0, &error);
                }
            }
        }
    }

    word_ids.len()
}

/// One positive and `negative` noise updates for `target`. Accumulates the
/// gradient for the hidden layer into `error`.
#[allow(clippy::too_many_arguments)]
fn negative_step(
    hidden: &[f32],
    target: usize,
    alpha: f32,
    negative: usize,
    vocab: &Vocabulary,
    output: &mut Weights<'_>,
    rng: &mut StdRng,
    error: &mut [f32],
) {
    let dim = hidden.len();
    for d in 0..=negative {
        let (word, label) = if d == 0 {
            (target, 1.0)
        } else {
            match vocab.sample_negative(rng) {
                Some(w) if w != target => (w, 0.0),
                _ => continue,
            }
        };

        let row = output.row(word, dim);
        let g = (label - sigmoid(dot(hidden, row))) * alpha;
        add_scaled(error, g, row);
        output.add_scaled(word, dim, g, hidden);
    }
}

/// FNV-1a over the tokens, with a separator byte so `["ab"]` and
/// `["a", "b"]` differ. Stable across builds and platforms.
fn token_seed(words: &[String]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0100_0000_01b3;
    words
        .iter()
        .flat_map(|w| w.bytes().chain(std::iter::once(0xff)))
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}

/// `rows * dim` values uniform in (-0.5, 0.5) / dim.
fn random_matrix(rng: &mut StdRng, rows: usize, dim: usize) -> Vec<f32> {
    let scale = dim.max(1) as f32;
    (0..rows * dim)
        .map(|_| (rng.random::<f32>() - 0.5) / scale)
        .collect()
}

fn add_scaled(target: &mut [f32], scale: f32, delta: &[f32]) {
    for (t, d) in target.iter_mut().zip(delta) {
        *t += scale * d;
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
