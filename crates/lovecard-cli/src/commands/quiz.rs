use clap::Args;
use lovecard_core::{Config, Event, Quiz};

#[derive(Args)]
pub struct QuizArgs {
    /// One pick per question, "a" or "b", comma-separated (e.g. "a,b,a,a,b")
    #[arg(long, value_delimiter = ',')]
    answers: Option<Vec<String>>,
    /// Output the result as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: QuizArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut quiz = Quiz::new(config.quiz.questions.clone());

    let Some(answers) = args.answers else {
        return list_questions(&quiz, args.json);
    };

    let total = quiz.questions().len();
    if answers.len() != total {
        return Err(format!("expected {total} answers, got {}", answers.len()).into());
    }

    let mut result = None;
    for (question, raw) in answers.iter().enumerate() {
        let option =
            parse_option(raw).ok_or_else(|| format!("invalid answer '{raw}', use a or b"))?;
        quiz.answer(question, option);
        if let Some(Event::QuizCompleted { result: done }) = quiz.advance_from(question) {
            result = Some(done);
        }
    }

    let result = result.ok_or("quiz did not complete")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.score_line);
        println!("{}", result.message);
    }
    Ok(())
}

pub fn parse_option(raw: &str) -> Option<usize> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "a" | "1" => Some(0),
        "b" | "2" => Some(1),
        _ => None,
    }
}

fn list_questions(quiz: &Quiz, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(quiz.questions())?);
        return Ok(());
    }
    for (i, question) in quiz.questions().iter().enumerate() {
        println!("{}. {}", i + 1, question.prompt);
        println!("   a) {}", question.options[0].label);
        println!("   b) {}", question.options[1].label);
    }
    Ok(())
}
