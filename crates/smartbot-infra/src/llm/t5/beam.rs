//! Model-agnostic beam search for encoder-decoder generation.
//!
//! The search is driven by a step closure: given the live decoder sequences
//! (each starting with the decoder start token), it returns one row of
//! vocabulary log-probabilities per sequence. This keeps the search free of
//! any tensor library and lets tests script the model.

use smartbot_types::error::ModelError;
use smartbot_types::llm::GenerationConfig;

/// Beam-search parameters for one generation call.
#[derive(Debug, Clone)]
pub struct BeamSearch {
    num_beams: usize,
    max_new_tokens: usize,
    early_stopping: bool,
    length_penalty: f32,
    start_token: u32,
    eos_token: u32,
}

/// A finished candidate: generated tokens (without start or EOS) and its
/// length-normalized score.
#[derive(Debug, Clone)]
struct Hypothesis {
    tokens: Vec<u32>,
    score: f32,
}

/// The best `capacity` finished hypotheses seen so far.
struct Finished {
    capacity: usize,
    length_penalty: f32,
    hypotheses: Vec<Hypothesis>,
}

impl Finished {
    fn new(capacity: usize, length_penalty: f32) -> Self {
        Self {
            capacity,
            length_penalty,
            hypotheses: Vec::with_capacity(capacity + 1),
        }
    }

    fn normalize(&self, sum_logprobs: f32, generated_len: usize) -> f32 {
        sum_logprobs / (generated_len.max(1) as f32).powf(self.length_penalty)
    }

    fn len(&self) -> usize {
        self.hypotheses.len()
    }

    fn worst_score(&self) -> f32 {
        self.hypotheses
            .iter()
            .map(|h| h.score)
            .fold(f32::INFINITY, f32::min)
    }

    fn add(&mut self, tokens: Vec<u32>, sum_logprobs: f32, generated_len: usize) {
        let score = self.normalize(sum_logprobs, generated_len);
        if self.hypotheses.len() < self.capacity || score > self.worst_score() {
            self.hypotheses.push(Hypothesis { tokens, score });
            if self.hypotheses.len() > self.capacity {
                let worst = self
                    .hypotheses
                    .iter()
                    .enumerate()
                    .min_by(|a, b| a.1.score.total_cmp(&b.1.score))
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                self.hypotheses.remove(worst);
            }
        }
    }

    /// Whether no live beam can still improve on the finished set.
    fn is_done(&self, early_stopping: bool, best_live_sum: f32, generated_len: usize) -> bool {
        if self.len() < self.capacity {
            return false;
        }
        if early_stopping {
            return true;
        }
        self.worst_score() >= self.normalize(best_live_sum, generated_len)
    }

    fn best(self) -> Option<Hypothesis> {
        self.hypotheses
            .into_iter()
            .reduce(|best, h| if h.score > best.score { h } else { best })
    }
}

impl BeamSearch {
    pub fn new(config: &GenerationConfig, start_token: u32, eos_token: u32) -> Self {
        Self {
            num_beams: config.num_beams.max(1),
            max_new_tokens: config.max_new_tokens,
            early_stopping: config.early_stopping,
            length_penalty: 1.0,
            start_token,
            eos_token,
        }
    }

    /// Run the search and return the best generated tokens, excluding the
    /// start token and the terminating EOS.
    pub fn run<F>(&self, mut step: F) -> Result<Vec<u32>, ModelError>
    where
        F: FnMut(&[Vec<u32>]) -> Result<Vec<Vec<f32>>, ModelError>,
    {
        let k = self.num_beams;
        let mut beams: Vec<(Vec<u32>, f32)> = vec![(vec![self.start_token], 0.0)];
        let mut finished = Finished::new(k, self.length_penalty);
        let mut done = false;

        for generated in 1..=self.max_new_tokens {
            let sequences: Vec<Vec<u32>> = beams.iter().map(|(seq, _)| seq.clone()).collect();
            let log_probs = step(&sequences)?;
            if log_probs.len() != beams.len() {
                return Err(ModelError::inference(format!(
                    "decoder returned {} rows for {} beams",
                    log_probs.len(),
                    beams.len()
                )));
            }

            // (beam, token, cumulative log-prob), best first
            let mut candidates: Vec<(usize, u32, f32)> = Vec::with_capacity(2 * k * beams.len());
            for (beam, row) in log_probs.iter().enumerate() {
                let base = beams[beam].1;
                for token in top_indices(row, 2 * k) {
                    candidates.push((beam, token as u32, base + row[token]));
                }
            }
            candidates.sort_by(|a, b| {
                b.2.total_cmp(&a.2)
                    .then(a.0.cmp(&b.0))
                    .then(a.1.cmp(&b.1))
            });
            candidates.truncate(2 * k);

            let mut next = Vec::with_capacity(k);
            for (rank, &(beam, token, score)) in candidates.iter().enumerate() {
                if token == self.eos_token {
                    if rank < k {
                        finished.add(beams[beam].0[1..].to_vec(), score, generated);
                    }
                } else {
                    let mut seq = beams[beam].0.clone();
                    seq.push(token);
                    next.push((seq, score));
                }
                if next.len() == k {
                    break;
                }
            }

            beams = next;
            let best_live = beams
                .iter()
                .map(|(_, s)| *s)
                .fold(f32::NEG_INFINITY, f32::max);
            if beams.is_empty() || finished.is_done(self.early_stopping, best_live, generated) {
                done = true;
                break;
            }
        }

        if !done {
            for (seq, score) in beams {
                let generated = seq.len() - 1;
                finished.add(seq[1..].to_vec(), score, generated);
            }
        }

        finished
            .best()
            .map(|h| h.tokens)
            .ok_or_else(|| ModelError::inference("beam search produced no hypotheses"))
    }
}

/// Indices of the `n` largest values in `row`, in no particular order.
fn top_indices(row: &[f32], n: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..row.len()).collect();
    if n < indices.len() {
        indices.select_nth_unstable_by(n, |&a, &b| row[b].total_cmp(&row[a]));
        indices.truncate(n);
    }
    indices
}
