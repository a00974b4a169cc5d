// src/generate/prompts.rs
//
// Prompt templates. Companies with a hand-written example summary get a
// few-shot prompt; everyone else gets the generic instruction.

use crate::corpus::normalize_company;

const ZERO_SHOT_INSTRUCTION: &str = "Please provide a comprehensive summary of the following earnings report. \
Format the output in Markdown. Use headings for different sections (e.g., Key Financial Highlights, Trends, Outlook). \
Use bullet points for lists of items. Bold key terms or figures.";

const FEW_SHOT_INSTRUCTION: &str = "Summarize the following earnings report for a retail investor. \
Match the structure, tone and level of detail of the example summary below exactly: \
Markdown headings, short bullet points, key figures in bold, no speculation beyond the report.";

const APPLE_EXAMPLE: &str = "## Key Financial Highlights
- **Revenue:** $94.9 billion, up **6%** year over year.
- **Diluted EPS:** $1.64, a September-quarter record.
- **Services revenue** reached an all-time high of **$25.0 billion**.

## Trends
- iPhone revenue grew in most geographic segments.
- Gross margin expanded on a favorable Services mix.

## Outlook
- Management expects continued Services growth and declared a **$0.25** quarterly dividend.";

const NVIDIA_EXAMPLE: &str = "## Key Financial Highlights
- **Revenue:** $35.1 billion, up **94%** year over year.
- **Data Center revenue:** $30.8 billion, up **112%**.
- **GAAP gross margin:** **74.6%**.

## Trends
- Demand for accelerated computing continues to outpace supply.
- Gaming and Automotive both grew sequentially.

## Outlook
- Next-quarter revenue guided to **$37.5 billion**, plus or minus 2%.";

const TESLA_EXAMPLE: &str = "## Key Financial Highlights
- **Total revenue:** $25.2 billion, up **8%** year over year.
- **GAAP operating income:** $2.7 billion; operating margin **10.8%**.
- **Free cash flow:** $2.7 billion.

## Trends
- Vehicle deliveries rose while average selling prices declined.
- Energy storage deployments reached a record.

## Outlook
- Volume growth expected to be modest ahead of next-generation vehicle launches.";

/// Generation prompt style for a company's summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    /// Embeds one worked example summary to steer tone and layout.
    FewShot { example: &'static str },
    /// Generic instruction for companies without an example.
    ZeroShot,
}

impl PromptTemplate {
    /// Builds the summary prompt around the full report text.
    pub fn render(&self, company: &str, report_text: &str) -> String {
        match self {
            PromptTemplate::FewShot { example } => format!(
                "{}\n\nExample summary:\n{}\n\nNow summarize the latest {} report.\n\nReport Text:\n{}",
                FEW_SHOT_INSTRUCTION, example, company, report_text
            ),
            PromptTemplate::ZeroShot => {
                format!("{}\n\nReports Text:\n{}", ZERO_SHOT_INSTRUCTION, report_text)
            }
        }
    }

    pub fn is_few_shot(&self) -> bool {
        matches!(self, PromptTemplate::FewShot { .. })
    }
}

/// Looks up the summary template for a company. Unknown companies get the
/// zero-shot template; this never fails.
pub fn select_prompt(company: &str) -> PromptTemplate {
    let example = match normalize_company(company).as_str() {
        "APPLE" => APPLE_EXAMPLE,
        "NVIDIA" => NVIDIA_EXAMPLE,
        "TESLA" => TESLA_EXAMPLE,
        _ => return PromptTemplate::ZeroShot,
    };
    PromptTemplate::FewShot { example }
}

/// Prompt for the two-column key-metrics table of `year`.
pub fn table_prompt(year: u32, report_text: &str) -> String {
    format!(
        "From the following financial text for the year {year}, extract key data points and present them in a Markdown table. \
The table should have two columns: 'Metric' and 'Value'. \
Include items like: Revenue, Net Income, EPS, Gross Margin, Operating Income, etc. Ensure the output is only the Markdown table.\n\n\
Text for {year}:\n{report_text}"
    )
}
