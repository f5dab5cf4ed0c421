//! Prompt sent to the summarization endpoint

/// A section of the generated weekly report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSection {
    /// Short narrative of the week.
    Relevant,
    /// Opportunity pipeline changes.
    Opportunities,
    /// Calendar events.
    Events,
    /// Open and completed tasks.
    Tasks,
}

impl ReportSection {
    /// All sections in report order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Relevant, Self::Opportunities, Self::Events, Self::Tasks]
    }

    /// Heading shown in the report.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Relevant => "📌 What's relevant",
            Self::Opportunities => "🎯 Opportunities update",
            Self::Events => "📅 Events Update",
            Self::Tasks => "💼 Tasks",
        }
    }

    /// Body lines the model fills in for each item of the section.
    #[must_use]
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Relevant => &[
                "Provide a small summary of what happened during the week, that's relevant and sounds like a report.",
            ],
            Self::Opportunities => &["Opportunity:", "Probability:", "Amount:"],
            Self::Events => &["Event:", "Description:", "Date"],
            Self::Tasks => &["Task:", "Priority:", "Status:", "Due date:"],
        }
    }
}

/// Builds the summarization prompt around raw CRM report data.
///
/// The data is embedded verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPrompt {
    text: String,
}

impl SummaryPrompt {
    /// Creates the prompt for `salesforce_data`.
    #[must_use]
    pub fn new(salesforce_data: &str) -> Self {
        let mut text = format!(
            "summarize the following text {salesforce_data} to sound like a report and answer \
             following the structure below for each item. Note that the following template \
             format is mandatory, and you need to interpret the h2 tags. If there's no data on \
             a specific section, do not add the section. If there's no data in a field, do not \
             add the empty field for that item."
        );

        for section in ReportSection::all() {
            text.push_str("\n\n");
            text.push_str(section.heading());
            text.push('\n');
            if *section != ReportSection::Relevant {
                text.push('\n');
            }
            text.push_str(&section.fields().join("\n"));
        }

        Self { text }
    }

    /// The prompt text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// JSON body expected by the summarization endpoint.
    #[must_use]
    pub fn to_request_body(&self) -> serde_json::Value {
        serde_json::json!({ "prompt": self.text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_data_verbatim() {
        let prompt = SummaryPrompt::new("Deal X closed, $10k");
        assert!(
            prompt
                .as_str()
                .starts_with("summarize the following text Deal X closed, $10k to sound like")
        );
    }

    #[test]
    fn test_prompt_lists_sections_in_order() {
        let prompt = SummaryPrompt::new("data");
        let text = prompt.as_str();

        let positions: Vec<usize> = ReportSection::all()
            .iter()
            .filter_map(|s| text.find(s.heading()))
            .collect();
        assert_eq!(positions.len(), 4);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.ends_with("Task:\nPriority:\nStatus:\nDue date:"));
        assert!(text.contains("🎯 Opportunities update\n\nOpportunity:\nProbability:\nAmount:"));
    }

    #[test]
    fn test_request_body() {
        let prompt = SummaryPrompt::new("x");
        assert_eq!(prompt.to_request_body()["prompt"], prompt.as_str());
    }
}
