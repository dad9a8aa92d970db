//! Instruction list with label bookkeeping.

use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

use super::instruction::{Filter, Instruction, Pad};

/// Structural defects in an instruction list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two steps produce the same label.
    #[error("label '{label}' produced more than once (step {step})")]
    DuplicateLabel {
        /// Step index of the second producer.
        step: usize,
        /// The repeated label.
        label: String,
    },

    /// A step consumes a label no earlier step produced.
    #[error("step {step} consumes undefined label '{label}'")]
    UndefinedLabel {
        /// Step index of the consumer.
        step: usize,
        /// The missing label.
        label: String,
    },

    /// A label is consumed by more than one step.
    #[error("label '{label}' consumed more than once (step {step})")]
    LabelReused {
        /// Step index of the second consumer.
        step: usize,
        /// The label.
        label: String,
    },

    /// A step references an input stream that does not exist.
    #[error("step {step} references input {index} but only {available} inputs exist")]
    InputOutOfRange {
        /// Step index.
        step: usize,
        /// Referenced input index.
        index: usize,
        /// Number of inputs.
        available: usize,
    },
}

/// An ordered list of instructions forming one filtergraph program.
///
/// Labels are allocated through [`emit`](Self::emit), which guarantees each
/// produced label is unique within the graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterGraph {
    steps: Vec<Instruction>,
    labels: BTreeSet<String>,
}

impl FilterGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step and return a pad referencing its output.
    ///
    /// The output label is `base`, or `base_2`, `base_3`, ... when `base`
    /// is already taken.
    pub fn emit(&mut self, inputs: Vec<Pad>, filter: Filter, base: &str) -> Pad {
        let output = self.fresh_label(base);
        #[cfg(feature = "tracing")]
        tracing::trace!("emit {} -> [{output}]", filter.name());
        self.steps.push(Instruction {
            inputs,
            filter,
            output: output.clone(),
        });
        Pad::Label(output)
    }

    fn fresh_label(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut n = 2;
        while self.labels.contains(&candidate) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        self.labels.insert(candidate.clone());
        candidate
    }

    /// Steps in emission order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when no step has been emitted.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate over steps.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.steps.iter()
    }

    /// Index of the step producing `label`.
    pub fn producer_of(&self, label: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.output == label)
    }

    /// The sub-program needed to produce `label`, in original order.
    ///
    /// Walks producers backwards from `label`. Returns `None` when nothing
    /// produces it.
    pub fn prune_for(&self, label: &str) -> Option<FilterGraph> {
        let root = self.producer_of(label)?;
        let producers: BTreeMap<&str, usize> = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, s)| (s.output.as_str(), i))
            .collect();

        let mut keep = BTreeSet::new();
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            if !keep.insert(idx) {
                continue;
            }
            for pad in &self.steps[idx].inputs {
                if let Some(&producer) = pad.as_label().and_then(|l| producers.get(l)) {
                    stack.push(producer);
                }
            }
        }

        let steps: Vec<Instruction> = keep.into_iter().map(|i| self.steps[i].clone()).collect();
        let labels = steps.iter().map(|s| s.output.clone()).collect();
        Some(FilterGraph { steps, labels })
    }

    /// Verify labels are defined before use, produced once, and consumed at
    /// most once, and that input references are in range.
    pub fn check(&self, input_count: usize) -> Result<(), GraphError> {
        let mut produced = BTreeSet::new();
        let mut consumed = BTreeSet::new();
        for (step, inst) in self.steps.iter().enumerate() {
            for pad in &inst.inputs {
                match pad {
                    Pad::Input(index) if *index >= input_count => {
                        return Err(GraphError::InputOutOfRange {
                            step,
                            index: *index,
                            available: input_count,
                        });
                    }
                    Pad::Input(_) => {}
                    Pad::Label(label) => {
                        if !produced.contains(label.as_str()) {
                            return Err(GraphError::UndefinedLabel {
                                step,
                                label: label.clone(),
                            });
                        }
                        if !consumed.insert(label.as_str()) {
                            return Err(GraphError::LabelReused {
                                step,
                                label: label.clone(),
                            });
                        }
                    }
                }
            }
            if !produced.insert(inst.output.as_str()) {
                return Err(GraphError::DuplicateLabel {
                    step,
                    label: inst.output.clone(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for FilterGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl Serialize for FilterGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
