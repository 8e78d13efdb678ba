//! Command handlers.
//!
//! Each invocation seeds a fresh in-memory repository with the project from
//! the command line and a local subscribed account holding one use.

use super::BriefArgs;
use claquette::{
    Account, AccountId, ClaquetteConfig, InMemoryScreenplayRepository, ModelGateway,
    OpenAiClient, PipelineOrchestrator, Project, ProjectId,
};
use std::error::Error;
use std::sync::Arc;
use tracing::info;

struct Session {
    pipeline: PipelineOrchestrator<OpenAiClient>,
    project: ProjectId,
    account: AccountId,
}

async fn session(config: &ClaquetteConfig, args: &BriefArgs) -> Result<Session, Box<dyn Error>> {
    let client = OpenAiClient::from_config(config)?;
    let gateway = ModelGateway::new(client).with_temperature(config.provider.temperature);

    let repository = Arc::new(InMemoryScreenplayRepository::new());
    let project = Project::new(&args.title, args.brief());
    let account = Account::new(true, 1);
    let (project_id, account_id) = (*project.id(), *account.id());
    repository.insert_project(project).await;
    repository.insert_account(account).await;

    info!(
        provider = %config.provider.name,
        model = %config.provider.chat_model,
        project = %project_id,
        "Session ready"
    );

    Ok(Session {
        pipeline: PipelineOrchestrator::new(gateway, repository),
        project: project_id,
        account: account_id,
    })
}

/// Run the full pipeline and print the screenplay.
pub async fn run_generate(config: &ClaquetteConfig, args: &BriefArgs) -> Result<(), Box<dyn Error>> {
    let session = session(config, args).await?;
    let screenplay = session
        .pipeline
        .generate_screenplay(&session.project, &session.account)
        .await?;
    println!("{}", serde_json::to_string_pretty(&screenplay)?);
    Ok(())
}

/// Generate characters only and print them.
pub async fn run_characters(
    config: &ClaquetteConfig,
    args: &BriefArgs,
) -> Result<(), Box<dyn Error>> {
    let session = session(config, args).await?;
    let characters = session
        .pipeline
        .generate_characters_only(&session.project, &session.account)
        .await?;
    println!("{}", serde_json::to_string_pretty(&characters)?);
    Ok(())
}

/// Generate a poster and print the project carrying it.
pub async fn run_poster(config: &ClaquetteConfig, args: &BriefArgs) -> Result<(), Box<dyn Error>> {
    let session = session(config, args).await?;
    let project = session
        .pipeline
        .generate_poster(&session.project, &session.account)
        .await?;
    println!("{}", serde_json::to_string_pretty(&project)?);
    Ok(())
}
