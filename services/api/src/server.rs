use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryAssessmentRepository, InMemoryAssignmentRepository, InMemoryChatRepository,
    InMemoryGoalRepository, InMemoryJournalRepository, InMemoryMoodRepository,
    InMemoryUserRepository,
};
use crate::rate_limit::{self, ApiRateLimits};
use crate::routes::{app_router, Services};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

use mindhaven::assessments::AssessmentService;
use mindhaven::assignments::AssignmentService;
use mindhaven::auth::TokenIssuer;
use mindhaven::chat::{ChatService, GeminiRelay};
use mindhaven::config::AppConfig;
use mindhaven::error::AppError;
use mindhaven::goals::GoalService;
use mindhaven::journal::JournalService;
use mindhaven::mood::MoodService;
use mindhaven::sentiment::SentimentAnalyzer;
use mindhaven::telemetry;
use mindhaven::users::AccountService;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    if config.chat.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set, chat replies will use the fallback message");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let tokens = TokenIssuer::new(&config.auth);
    let analyzer = SentimentAnalyzer::bundled();
    let relay = Arc::new(GeminiRelay::new(&config.chat));

    let services = Services {
        accounts: Arc::new(AccountService::new(
            Arc::new(InMemoryUserRepository::default()),
            tokens.clone(),
        )),
        journal: Arc::new(JournalService::new(
            Arc::new(InMemoryJournalRepository::default()),
            analyzer.clone(),
        )),
        moods: Arc::new(MoodService::new(Arc::new(InMemoryMoodRepository::default()))),
        goals: Arc::new(GoalService::new(Arc::new(InMemoryGoalRepository::default()))),
        assignments: Arc::new(AssignmentService::new(Arc::new(
            InMemoryAssignmentRepository::default(),
        ))),
        assessments: Arc::new(AssessmentService::new(Arc::new(
            InMemoryAssessmentRepository::seeded(),
        ))),
        chat: Arc::new(ChatService::new(
            Arc::new(InMemoryChatRepository::default()),
            relay,
            analyzer,
        )),
    };

    let limits = Arc::new(ApiRateLimits::new());

    let app = app_router(services)
        .layer(Extension(app_state))
        .layer(Extension(tokens))
        .layer(axum::middleware::from_fn_with_state(
            limits,
            rate_limit::enforce,
        ))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "mental wellness service ready");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
