use crate::infra::{
    InMemoryAssessmentRepository, InMemoryChatRepository, InMemoryJournalRepository,
    InMemoryMoodRepository, InMemoryUserRepository,
};
use chrono::Utc;
use clap::Args;
use std::collections::BTreeMap;
use std::sync::Arc;

use mindhaven::assessments::{AssessmentService, AssessmentTypeId, QuestionId, SubmissionRequest};
use mindhaven::auth::TokenIssuer;
use mindhaven::chat::{ChatService, GeminiRelay};
use mindhaven::config::AppConfig;
use mindhaven::error::AppError;
use mindhaven::journal::JournalService;
use mindhaven::mood::MoodService;
use mindhaven::sentiment::SentimentAnalyzer;
use mindhaven::users::{AccountService, Registration};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the chat portion of the demo (no relay round trip).
    #[arg(long)]
    pub(crate) skip_chat: bool,
}

fn service_err(err: impl std::fmt::Display) -> AppError {
    AppError::Service(err.to_string())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let tokens = TokenIssuer::new(&config.auth);
    let analyzer = SentimentAnalyzer::bundled();

    println!("MindHaven walkthrough");
    println!("=====================");

    let accounts = AccountService::new(Arc::new(InMemoryUserRepository::default()), tokens);
    let session = accounts
        .register(Registration {
            username: "demo".to_string(),
            email: "demo@example.com".to_string(),
            password: "walkthrough".to_string(),
        })
        .map_err(service_err)?;
    let user_id = session.user.id.clone();
    println!("registered {} <{}>", session.user.username, session.user.email);

    println!();
    println!("Assessments");
    println!("-----------");
    let assessments = AssessmentService::new(Arc::new(InMemoryAssessmentRepository::seeded()));
    for assessment in assessments.types().map_err(service_err)? {
        println!("- {} ({})", assessment.name, assessment.type_id.0);
    }

    let mut answers = BTreeMap::new();
    for index in 1..=9 {
        let value = if index <= 4 {
            "more_than_half"
        } else {
            "several_days"
        };
        answers.insert(QuestionId(format!("phq9-q{index}")), value.to_string());
    }
    let view = assessments
        .submit(
            &user_id,
            SubmissionRequest {
                type_id: AssessmentTypeId("phq-9".to_string()),
                answers,
            },
        )
        .map_err(service_err)?;
    println!(
        "submitted PHQ-9 -> score {} | {} | {}",
        view.score, view.interpretation, view.recommendations
    );
    let history = assessments.history(&user_id).map_err(service_err)?;
    println!("history now holds {} result(s)", history.len());

    println!();
    println!("Journal");
    println!("-------");
    let journal = JournalService::new(
        Arc::new(InMemoryJournalRepository::default()),
        analyzer.clone(),
    );
    for body in [
        "Slept well and had a calm, hopeful morning",
        "Work was stressful and I feel worried tonight",
    ] {
        let entry = journal.create_entry(&user_id, body).map_err(service_err)?;
        println!(
            "[{} {:+}] {}",
            entry.sentiment.sentiment.label(),
            entry.sentiment.score,
            body
        );
    }
    let trends = journal.analysis(&user_id).map_err(service_err)?;
    println!(
        "trend: {} entries, {} positive / {} neutral / {} negative, average {}",
        trends.total_entries,
        trends.sentiments.positive,
        trends.sentiments.neutral,
        trends.sentiments.negative,
        trends.average_score
    );

    println!();
    println!("Mood");
    println!("----");
    let moods = MoodService::new(Arc::new(InMemoryMoodRepository::default()));
    for (score, notes) in [
        (4, Some("rough start".to_string())),
        (6, None),
        (7, Some("walk helped".to_string())),
    ] {
        moods.create_entry(&user_id, score, notes).map_err(service_err)?;
    }
    let stats = moods.stats(&user_id, Utc::now()).map_err(service_err)?;
    println!(
        "weekly average {} over {} entries, trend {:+}",
        stats.weekly_average, stats.entries_this_week, stats.trend
    );

    if !args.skip_chat {
        println!();
        println!("Chat");
        println!("----");
        let chat = ChatService::new(
            Arc::new(InMemoryChatRepository::default()),
            Arc::new(GeminiRelay::new(&config.chat)),
            analyzer,
        );
        let conversation = chat.start_conversation(&user_id).map_err(service_err)?;
        for text in ["Hello", "I had trouble sleeping again, any advice?"] {
            let reply = chat
                .send_message(&user_id, &session.user.username, &conversation.conversation_id, text)
                .await
                .map_err(service_err)?;
            println!("you: {text}");
            println!("ai:  {}", reply.body);
        }
        if config.chat.gemini_api_key.is_none() {
            println!("(no GEMINI_API_KEY configured, replies use the offline fallback)");
        }
    }

    Ok(())
}
