/*!
 * Prompt templates for LLM requests.
 *
 * Each request kind has a system prompt stating the output contract and a
 * user prompt carrying the payload between `<INPUT>` tags.
 */

/// Language placeholder used in the templates
const LANG: &str = "{target_language}";

const BATCH_SYSTEM: &str = "You are a professional subtitle translator. Strict output rules:\n\
1) Translate every input line into {target_language}, keeping meaning, terminology and proper nouns.\n\
2) Output exactly one line per input line, in the same order. Never merge, split or drop lines.\n\
3) Do not add explanations, commentary, numbering or extra punctuation.\n\
4) If an input line is blank or only noise markers, output a blank line (or the line with the noise removed).\n\
5) Output only the translations, with no code blocks, prefixes or suffixes.";

const DOCUMENT_SYSTEM: &str = "You are a professional translator and editor. Translate the complete subtitle text \
provided by the user into {target_language} and split it into paragraphs by meaning.\n\
Rules:\n\
1) Output only {target_language} paragraphs, one paragraph per line, separated by a single blank line.\n\
2) Do not include the source text, explanations, numbering or code block markers.\n\
3) Merge scattered short sentences so the context reads coherently and sentence breaks feel natural.";

const SUMMARY_SYSTEM: &str = "You are a professional content analyst. Based on the complete subtitle text provided \
by the user, write a structured summary in {target_language}.\n\
Rules:\n\
1) Cover the core topic, the key points and the main arguments or opinions.\n\
2) Use a clear paragraph structure organised with short headings or numbering.\n\
3) Stay objective and accurate; do not add personal opinions.\n\
4) Aim for roughly 300-500 words (or characters, for CJK languages).\n\
5) Use plain, accessible language and avoid excessive jargon.";

const TITLE_SYSTEM: &str = "You are a professional translator. Translate the title provided by the user into \
{target_language}, keeping it concise and accurate. Output only the translation, without any explanation.";

const CHAPTERS_SYSTEM: &str = "You are a professional translator. Translate the chapter titles provided by the user \
into {target_language}, one per line.\n\
Rules:\n\
1) Each output line is the translation of the corresponding input title.\n\
2) Keep them concise and natural in {target_language}.\n\
3) Do not add numbering, explanations or anything else.\n\
4) Keep exactly the same number of lines.";

/// System and user prompt pair for one request
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

fn fill(template: &str, language: &str) -> String {
    template.replace(LANG, language)
}

/// Prompt for translating a batch of lines one-to-one
pub fn batch_prompt(lines: &[String], language: &str) -> Prompt {
    Prompt {
        system: fill(BATCH_SYSTEM, language),
        user: format!(
            "Translate the following subtitle lines into {} line by line. \
             Keep the line count and order identical and output only the translations.\n\n\
             <INPUT>\n{}\n</INPUT>\n",
            language,
            lines.join("\n")
        ),
    }
}

/// Prompt for translating and re-paragraphing a whole document
pub fn document_prompt(document: &str, language: &str) -> Prompt {
    Prompt {
        system: fill(DOCUMENT_SYSTEM, language),
        user: format!(
            "Here is the complete subtitle text:\n<INPUT>\n{}\n</INPUT>\n\
             Output the {} paragraphs directly, with a blank line between paragraphs.",
            document.trim(),
            language
        ),
    }
}

/// Prompt for a structured summary of a whole document
pub fn summary_prompt(document: &str, language: &str) -> Prompt {
    Prompt {
        system: fill(SUMMARY_SYSTEM, language),
        user: format!(
            "Here is the complete subtitle text. Write a structured {} summary of it:\n\n\
             <INPUT>\n{}\n</INPUT>\n\n\
             Output the summary directly, organised with paragraphs and headings.",
            language,
            document.trim()
        ),
    }
}

/// Prompt for a single video title
pub fn title_prompt(title: &str, language: &str) -> Prompt {
    Prompt {
        system: fill(TITLE_SYSTEM, language),
        user: format!("Translate the following title into {}:\n{}", language, title.trim()),
    }
}

/// Prompt for a list of chapter titles, one per line
pub fn chapters_prompt(titles: &[String], language: &str) -> Prompt {
    Prompt {
        system: fill(CHAPTERS_SYSTEM, language),
        user: format!(
            "Translate the following chapter titles into {} line by line:\n\n{}",
            language,
            titles.join("\n")
        ),
    }
}
