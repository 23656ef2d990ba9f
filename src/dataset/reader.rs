use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::constants::dataset::DELIMITER;
use crate::types::{ClassifierError, Example, HttpMethod, Question, Result, ResultExt};

#[derive(Debug, Deserialize)]
struct QuestionRow {
    uid: String,
    question: String,
}

#[derive(Debug, Deserialize)]
struct ExampleRow {
    question: String,
    #[serde(rename = "type")]
    method: String,
    request: String,
}

fn reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .trim(csv::Trim::All)
        // an unquoted `;` in free text only spills into unnamed trailing fields
        .flexible(true)
        .from_path(path)
        .with_path(path)
}

/// Read the questions to classify. Columns other than `uid` and `question` are ignored.
pub fn read_questions(path: &Path) -> Result<Vec<Question>> {
    let mut questions = Vec::new();

    for (line, row) in reader(path)?.deserialize::<QuestionRow>().enumerate() {
        let row = row.with_path(path)?;
        if row.question.is_empty() {
            return Err(ClassifierError::dataset(
                path.display().to_string(),
                format!("empty question for uid {:?} (row {})", row.uid, line + 1),
            ));
        }
        questions.push(Question::new(row.uid, row.question));
    }

    debug!("Read {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

/// Read labelled examples (`question;type;request`)
pub fn read_examples(path: &Path) -> Result<Vec<Example>> {
    let mut examples = Vec::new();

    for (line, row) in reader(path)?.deserialize::<ExampleRow>().enumerate() {
        let row = row.with_path(path)?;
        let method: HttpMethod = row.method.parse().map_err(|e: String| {
            ClassifierError::dataset(path.display().to_string(), format!("row {}: {}", line + 1, e))
        })?;
        examples.push(Example::new(row.question, method, row.request));
    }

    debug!("Read {} examples from {}", examples.len(), path.display());
    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_questions_in_order() {
        let file = csv_file("uid;question\nq1;Show SBER quotes\nq2;What time is it on the exchange?\n");
        let questions = read_questions(file.path()).unwrap();
        assert_eq!(
            questions,
            vec![
                Question::new("q1", "Show SBER quotes"),
                Question::new("q2", "What time is it on the exchange?"),
            ]
        );
    }

    #[test]
    fn test_extra_columns_ignored() {
        let file = csv_file("uid;lang;question\na;ru;Cancel order 5\n");
        let questions = read_questions(file.path()).unwrap();
        assert_eq!(questions[0].question, "Cancel order 5");
    }

    #[test]
    fn test_quoted_delimiter_kept() {
        let file = csv_file("uid;question\nq1;\"Buy 10 SBER; at market\"\n");
        let questions = read_questions(file.path()).unwrap();
        assert_eq!(questions[0].question, "Buy 10 SBER; at market");
    }

    #[test]
    fn test_ragged_row_keeps_named_columns() {
        let file = csv_file("uid;question\nq1;Buy 10 SBER; at market\nq2;Show quotes\n");
        let questions = read_questions(file.path()).unwrap();
        assert_eq!(
            questions,
            vec![
                Question::new("q1", "Buy 10 SBER"),
                Question::new("q2", "Show quotes"),
            ]
        );
    }

    #[test]
    fn test_missing_column_is_dataset_error() {
        let file = csv_file("id;question\nq1;hello\n");
        let err = read_questions(file.path()).unwrap_err();
        assert!(matches!(err, ClassifierError::Dataset { .. }));
    }

    #[test]
    fn test_empty_question_rejected() {
        let file = csv_file("uid;question\nq1;\n");
        let err = read_questions(file.path()).unwrap_err();
        assert!(err.to_string().contains("empty question"));
    }

    #[test]
    fn test_missing_file_is_dataset_error() {
        let err = read_questions(Path::new("/nonexistent/test.csv")).unwrap_err();
        assert!(matches!(err, ClassifierError::Dataset { .. }));
    }

    #[test]
    fn test_read_examples() {
        let file = csv_file(
            "question;type;request\n\
             Show my orders;GET;/v1/accounts/{account_id}/orders\n\
             Cancel order 7;delete;/v1/accounts/{account_id}/orders/7\n",
        );
        let examples = read_examples(file.path()).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[1].method, HttpMethod::Delete);
        assert_eq!(examples[1].path, "/v1/accounts/{account_id}/orders/7");
    }

    #[test]
    fn test_unknown_method_rejected() {
        let file = csv_file("question;type;request\nPing;HEAD;/v1/ping\n");
        let err = read_examples(file.path()).unwrap_err();
        assert!(matches!(err, ClassifierError::Dataset { .. }));
        assert!(err.to_string().contains("row 1"));
    }
}
