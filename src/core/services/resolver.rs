//! Fuzzy category resolution.
//!
//! Resolution is modelled as a pure state machine: the caller feeds answers
//! in and receives the next required question (or a final outcome) back, so
//! the interactive loop owns all blocking I/O and the logic stays testable.

/// Injectable string-similarity strategy. Any implementation works as long
/// as it returns a ratio in `[0, 1]` comparable against [`MATCH_CUTOFF`].
pub trait Similarity {
    fn ratio(&self, a: &str, b: &str) -> f64;
}

/// Default strategy: Sørensen–Dice bigram coefficient over lowercased input.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiceSimilarity;

impl Similarity for DiceSimilarity {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        strsim::sorensen_dice(&a.to_lowercase(), &b.to_lowercase())
    }
}

/// Minimum similarity ratio for a known category to be offered as a match.
pub const MATCH_CUTOFF: f64 = 0.7;

/// Picks the single closest known category at or above the cutoff.
/// Only the best match is ever offered, never a ranked list.
pub fn best_match<'a, I>(input: &str, known: I, similarity: &dyn Similarity) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(f64, &str)> = None;
    for candidate in known {
        let ratio = similarity.ratio(input, candidate);
        if ratio < MATCH_CUTOFF {
            continue;
        }
        match best {
            Some((top, _)) if top >= ratio => {}
            _ => best = Some((ratio, candidate)),
        }
    }
    best.map(|(_, name)| name)
}

/// The next question the interactive loop must answer, or a final outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionStep {
    /// Ask the user to confirm the suggested existing category.
    ConfirmSuggestion { suggestion: String },
    /// Ask the user whether to create `name` as a new category.
    OfferCreate { name: String },
    /// Ask the user for a strictly positive monthly budget for `name`.
    /// Repeats until a valid amount is supplied.
    AskBudget { name: String },
    /// Resolution finished.
    Done(Resolved),
}

/// Final outcome of a resolution exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// The expense may be recorded under `category`. When the category was
    /// freshly created, `new_budget` carries the limit to register.
    Accepted {
        category: String,
        new_budget: Option<f64>,
    },
    /// The user declined both the suggestion and creating a new category.
    Rejected,
}

/// A caller-supplied answer to the pending [`ResolutionStep`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Answer {
    Yes,
    No,
    Budget(f64),
}

#[derive(Debug, Clone, PartialEq)]
enum FlowState {
    AwaitConfirm { suggestion: String },
    AwaitCreate,
    AwaitBudget,
    Finished(Resolved),
}

/// Drives one category resolution from free-text input to an outcome.
#[derive(Debug, Clone)]
pub struct ResolutionFlow {
    input: String,
    state: FlowState,
}

impl ResolutionFlow {
    /// Starts a resolution for `input` against the known category set
    /// (budget-map keys plus categories already on the ledger).
    pub fn begin<'a, I>(
        input: &str,
        known: I,
        similarity: &dyn Similarity,
    ) -> (Self, ResolutionStep)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let input = input.trim().to_string();
        match best_match(&input, known, similarity) {
            Some(suggestion) => {
                let suggestion = suggestion.to_string();
                let flow = Self {
                    input,
                    state: FlowState::AwaitConfirm {
                        suggestion: suggestion.clone(),
                    },
                };
                (flow, ResolutionStep::ConfirmSuggestion { suggestion })
            }
            None => {
                let step = ResolutionStep::OfferCreate {
                    name: input.clone(),
                };
                let flow = Self {
                    input,
                    state: FlowState::AwaitCreate,
                };
                (flow, step)
            }
        }
    }

    /// Feeds the answer to the pending question and returns the next step.
    /// An answer of the wrong kind re-asks the pending question.
    pub fn answer(&mut self, answer: Answer) -> ResolutionStep {
        let state = std::mem::replace(&mut self.state, FlowState::AwaitCreate);
        let (next, step) = Self::advance(&self.input, state, answer);
        self.state = next;
        step
    }

    fn advance(input: &str, state: FlowState, answer: Answer) -> (FlowState, ResolutionStep) {
        match (state, answer) {
            (FlowState::AwaitConfirm { suggestion }, Answer::Yes) => {
                Self::finished(Resolved::Accepted {
                    category: suggestion,
                    new_budget: None,
                })
            }
            (FlowState::AwaitConfirm { .. }, Answer::No) => (
                FlowState::AwaitCreate,
                ResolutionStep::OfferCreate {
                    name: input.to_string(),
                },
            ),
            (FlowState::AwaitCreate, Answer::Yes) => (
                FlowState::AwaitBudget,
                ResolutionStep::AskBudget {
                    name: input.to_string(),
                },
            ),
            (FlowState::AwaitCreate, Answer::No) => Self::finished(Resolved::Rejected),
            (FlowState::AwaitBudget, Answer::Budget(limit)) if limit > 0.0 => {
                Self::finished(Resolved::Accepted {
                    category: input.to_string(),
                    new_budget: Some(limit),
                })
            }
            // Non-positive budgets are re-asked until satisfied.
            (FlowState::AwaitBudget, Answer::Budget(_)) => (
                FlowState::AwaitBudget,
                ResolutionStep::AskBudget {
                    name: input.to_string(),
                },
            ),
            (FlowState::Finished(resolved), _) => {
                let step = ResolutionStep::Done(resolved.clone());
                (FlowState::Finished(resolved), step)
            }
            (state, _) => {
                let step = Self::pending(input, &state);
                (state, step)
            }
        }
    }

    fn finished(resolved: Resolved) -> (FlowState, ResolutionStep) {
        let step = ResolutionStep::Done(resolved.clone());
        (FlowState::Finished(resolved), step)
    }

    fn pending(input: &str, state: &FlowState) -> ResolutionStep {
        match state {
            FlowState::AwaitConfirm { suggestion } => ResolutionStep::ConfirmSuggestion {
                suggestion: suggestion.clone(),
            },
            FlowState::AwaitCreate => ResolutionStep::OfferCreate {
                name: input.to_string(),
            },
            FlowState::AwaitBudget => ResolutionStep::AskBudget {
                name: input.to_string(),
            },
            FlowState::Finished(resolved) => ResolutionStep::Done(resolved.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-ratio strategy for exercising the cutoff contract.
    struct Fixed(f64);

    impl Similarity for Fixed {
        fn ratio(&self, _: &str, _: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn dice_rates_close_names_above_cutoff() {
        let sim = DiceSimilarity;
        assert!(sim.ratio("Groceries", "Grocery") >= MATCH_CUTOFF);
        assert!(sim.ratio("groceries", "GROCERIES") >= MATCH_CUTOFF);
    }

    #[test]
    fn dice_rates_unrelated_names_below_cutoff() {
        let sim = DiceSimilarity;
        assert!(sim.ratio("Groceries", "Entertainment") < MATCH_CUTOFF);
    }

    #[test]
    fn candidate_exactly_at_cutoff_is_offered() {
        let known = ["Groceries"];
        assert_eq!(
            best_match("groccelery", known, &Fixed(MATCH_CUTOFF)),
            Some("Groceries")
        );
        assert_eq!(best_match("grocelery", known, &Fixed(0.699)), None);
    }

    #[test]
    fn best_match_returns_single_closest() {
        struct ByLength;
        impl Similarity for ByLength {
            fn ratio(&self, a: &str, b: &str) -> f64 {
                if a.len() == b.len() {
                    1.0
                } else {
                    0.8
                }
            }
        }
        let known = ["Fuel", "Food", "Travel"];
        // All qualify; the first with the top ratio wins.
        assert_eq!(best_match("Fees", known, &ByLength), Some("Fuel"));
    }

    #[test]
    fn confirming_a_suggestion_resolves_to_existing_casing() {
        let known = ["Groceries"];
        let (mut flow, step) = ResolutionFlow::begin("grocery", known, &DiceSimilarity);
        assert_eq!(
            step,
            ResolutionStep::ConfirmSuggestion {
                suggestion: "Groceries".into()
            }
        );
        let done = flow.answer(Answer::Yes);
        assert_eq!(
            done,
            ResolutionStep::Done(Resolved::Accepted {
                category: "Groceries".into(),
                new_budget: None,
            })
        );
    }

    #[test]
    fn declined_suggestion_falls_through_to_creation() {
        let known = ["Groceries"];
        let (mut flow, _) = ResolutionFlow::begin("grocery", known, &DiceSimilarity);
        let step = flow.answer(Answer::No);
        assert_eq!(
            step,
            ResolutionStep::OfferCreate {
                name: "grocery".into()
            }
        );
        let step = flow.answer(Answer::Yes);
        assert_eq!(
            step,
            ResolutionStep::AskBudget {
                name: "grocery".into()
            }
        );
        let done = flow.answer(Answer::Budget(250.0));
        assert_eq!(
            done,
            ResolutionStep::Done(Resolved::Accepted {
                category: "grocery".into(),
                new_budget: Some(250.0),
            })
        );
    }

    #[test]
    fn no_suggestion_offers_creation_directly() {
        let known = ["Entertainment"];
        let (_, step) = ResolutionFlow::begin("Groceries", known, &DiceSimilarity);
        assert_eq!(
            step,
            ResolutionStep::OfferCreate {
                name: "Groceries".into()
            }
        );
    }

    #[test]
    fn declining_creation_rejects_the_resolution() {
        let (mut flow, _) = ResolutionFlow::begin("Vices", [], &DiceSimilarity);
        let done = flow.answer(Answer::No);
        assert_eq!(done, ResolutionStep::Done(Resolved::Rejected));
    }

    #[test]
    fn non_positive_budget_is_reasked() {
        let (mut flow, _) = ResolutionFlow::begin("Pets", [], &DiceSimilarity);
        flow.answer(Answer::Yes);
        assert_eq!(
            flow.answer(Answer::Budget(0.0)),
            ResolutionStep::AskBudget { name: "Pets".into() }
        );
        assert_eq!(
            flow.answer(Answer::Budget(-3.0)),
            ResolutionStep::AskBudget { name: "Pets".into() }
        );
        assert_eq!(
            flow.answer(Answer::Budget(50.0)),
            ResolutionStep::Done(Resolved::Accepted {
                category: "Pets".into(),
                new_budget: Some(50.0),
            })
        );
    }

    #[test]
    fn mismatched_answer_reasks_pending_question() {
        let known = ["Groceries"];
        let (mut flow, _) = ResolutionFlow::begin("grocery", known, &DiceSimilarity);
        assert_eq!(
            flow.answer(Answer::Budget(10.0)),
            ResolutionStep::ConfirmSuggestion {
                suggestion: "Groceries".into()
            }
        );
    }
}
