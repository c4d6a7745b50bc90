//! CLI command implementations

use advisor_core::AdvisorConfig;
use advisor_resolver::{Resolver, Tool};
use advisor_server::{AdvisorServer, ServerConfig};
use advisor_store::GraphStore;
use anyhow::Context;
use serde::Serialize;
use std::path::Path;

/// Load config, open the configured store and build a resolver over it.
pub fn open_resolver(config_path: &Path) -> anyhow::Result<Resolver> {
    let config = AdvisorConfig::load(config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;
    let store = advisor_store::create_store(&config.store)?;
    tracing::info!("Using {} store, {} configured majors", store.name(), config.majors.len());
    Ok(Resolver::from_config(store, &config))
}

pub async fn serve(resolver: Resolver, host: String, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting advisor server on {}:{}", host, port);
    let server = AdvisorServer::new(resolver, ServerConfig { host, port });
    server.start().await
}

pub async fn course(resolver: &Resolver, course_id: &str) -> anyhow::Result<()> {
    print_json(&resolver.lookup_course(course_id).await?)
}

pub async fn context(resolver: &Resolver, course_id: &str) -> anyhow::Result<()> {
    print_json(&resolver.course_context(course_id).await?)
}

pub async fn prereqs(resolver: &Resolver, course_id: &str, transitive: bool) -> anyhow::Result<()> {
    let tool = if transitive {
        Tool::TransitivePrerequisites
    } else {
        Tool::ImmediatePrerequisites
    };
    println!("{}", tool.invoke(resolver, course_id).await?);
    Ok(())
}

pub async fn major(resolver: &Resolver, major_id: &str) -> anyhow::Result<()> {
    print_json(&resolver.major_requirements(major_id).await?)
}

pub async fn milestones(resolver: &Resolver) -> anyhow::Result<()> {
    print_json(&resolver.milestone_groups().await?)
}

pub fn majors(resolver: &Resolver) {
    for (name, major_id) in resolver.majors().iter() {
        println!("{major_id}\t{name}");
    }
}

pub async fn tool(resolver: &Resolver, name: Option<&str>, input: &str) -> anyhow::Result<()> {
    let Some(name) = name else {
        for tool in Tool::ALL {
            println!("{:<26}{}", tool.name(), tool.description());
        }
        return Ok(());
    };
    let tool = Tool::from_name(name)?;
    println!("{}", tool.invoke(resolver, input).await?);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
