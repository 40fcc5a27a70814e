//! InitializeQuestionPrioritiesHandler - Command handler that ranks a
//! category's askable questions and writes the ranks to the catalog.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::analysis::{InitializationReport, QuestionPriorityInitializer};
use crate::domain::foundation::{Category, CommandMetadata};
use crate::domain::rules::{QuestionPriority, RuleError, RuleSet};
use crate::ports::{QuestionPriorityRepository, RuleRepository};

#[derive(Debug, Clone)]
pub struct InitializeQuestionPrioritiesCommand {
    pub category: Category,
}

pub struct InitializeQuestionPrioritiesHandler {
    rules: Arc<dyn RuleRepository>,
    questions: Arc<dyn QuestionPriorityRepository>,
}

impl InitializeQuestionPrioritiesHandler {
    pub fn new(
        rules: Arc<dyn RuleRepository>,
        questions: Arc<dyn QuestionPriorityRepository>,
    ) -> Self {
        Self { rules, questions }
    }

    /// Upserts every ranked question. Entries whose rank is unchanged are
    /// not rewritten and only count toward `total`.
    ///
    /// # Errors
    ///
    /// - `InvalidCategory` if the category has no rules
    pub async fn handle(
        &self,
        cmd: InitializeQuestionPrioritiesCommand,
        metadata: CommandMetadata,
    ) -> Result<InitializationReport, RuleError> {
        let rules = self.rules.list(Some(&cmd.category)).await?;
        if rules.is_empty() {
            return Err(RuleError::invalid_category(cmd.category.as_str()));
        }
        let set = RuleSet::compile(cmd.category.clone(), &rules);
        let ranked = QuestionPriorityInitializer::rank(&set);

        let mut existing: HashMap<String, QuestionPriority> = self
            .questions
            .list(&cmd.category)
            .await?
            .into_iter()
            .map(|entry| (entry.question().to_string(), entry))
            .collect();

        let mut report = InitializationReport {
            total: ranked.len(),
            ..Default::default()
        };
        for question in ranked {
            match existing.remove(&question.question) {
                Some(mut entry) => {
                    if entry.priority() != question.priority {
                        entry.set_priority(question.priority);
                        self.questions.update(&entry).await?;
                        report.updated += 1;
                    }
                }
                None => {
                    let entry = QuestionPriority::new(
                        cmd.category.clone(),
                        question.question,
                        question.priority,
                    )?;
                    self.questions.save(&entry).await?;
                    report.added += 1;
                }
            }
        }

        tracing::info!(
            correlation_id = %metadata.correlation_id(),
            category = %cmd.category,
            added = report.added,
            updated = report.updated,
            total = report.total,
            "question priorities initialized"
        );
        Ok(report)
    }
}
