use std::num::NonZeroUsize;

/// Instructions placed at the top of every title batch file
pub const TITLE_BATCH_PROMPT: &str = "Please help categorize the following conversation titles \
into appropriate categories. For each title, assign a category that best describes its content. \
Provide the output in the format 'Title: Category'. Ensure that the output is structured as a \
JSON object.\n\
Example:\n\
{\n    \"How to cook pasta\": \"Cooking\",\n    \"Best practices in Python\": \"Programming\",\n    \
\"Understanding financial markets\": \"Finance\"\n}\n\
Now, here are the titles:";

/// One `titles_part_<n>.txt` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleBatch {
    pub file_name: String,
    pub contents: String,
}

/// Splits titles into fixed-size batches, each prefixed with [`TITLE_BATCH_PROMPT`]
///
/// The answers to these batches are meant to come back as override files.
pub fn split_title_batches(titles: &[String], batch_size: NonZeroUsize) -> Vec<TitleBatch> {
    titles
        .chunks(batch_size.get())
        .enumerate()
        .map(|(i, chunk)| {
            let mut contents = format!("{}\n\n", TITLE_BATCH_PROMPT);
            for title in chunk {
                contents.push_str(title);
                contents.push('\n');
            }
            TitleBatch { file_name: format!("titles_part_{}.txt", i + 1), contents }
        })
        .collect()
}
