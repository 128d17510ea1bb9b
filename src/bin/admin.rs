// docroute - administration and inspection CLI
// Run with: cargo run --bin admin -- <command>

//! Small operator tool for the routing workflow: print the routing table,
//! show per-role inbox rules, or walk a demonstration document through the
//! full pipeline against an in-memory engine.

use clap::{Parser, Subcommand};
use chrono::NaiveDate;
use docroute::{
    actionable_statuses, CommentType, DocumentStatus, DocumentType, Initiator, Priority,
    Recommendation, RegisterDocument, Role, RoutingEngine, ROUTING_TABLE,
};

#[derive(Parser)]
#[command(name = "admin", about = "docroute administration and inspection utility")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every legal edge of the routing table
    Routes,
    /// Show which statuses each role can act on
    Inboxes,
    /// Walk a demonstration document through the full pipeline
    Demo {
        /// Route the document through the committee instead of the chair
        #[arg(long)]
        committee: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Routes => print_routes(),
        Commands::Inboxes => print_inboxes(),
        Commands::Demo { committee } => run_demo(committee).await?,
    }

    Ok(())
}

fn print_routes() {
    println!("{:<34} {:<16} {:<10} {:<34} {}", "FROM", "ROLE", "ACTION", "TO", "HANDLER");
    for edge in ROUTING_TABLE {
        println!(
            "{:<34} {:<16} {:<10} {:<34} {}",
            edge.from, edge.role, edge.action, edge.to, edge.handler
        );
    }
}

fn print_inboxes() {
    for role in Role::ALL {
        let statuses: Vec<&str> = actionable_statuses(role)
            .iter()
            .map(|status| status.as_str())
            .collect();
        println!("{:<16} {}", role, statuses.join(", "));
    }
}

async fn run_demo(committee: bool) -> Result<(), Box<dyn std::error::Error>> {
    let engine = RoutingEngine::in_memory();

    let doc = engine
        .register(RegisterDocument {
            reference_number: "TNPSB/2024/001".to_string(),
            subject: "Staff promotion request".to_string(),
            document_type: DocumentType::Letter,
            priority: Priority::High,
            initiator: Initiator {
                department: "HR".to_string(),
                contact_name: "A. Kumar".to_string(),
                contact_email: Some("a.kumar@example.gov".to_string()),
                contact_phone: None,
            },
            document_date: NaiveDate::from_ymd_opt(2024, 3, 11)
                .ok_or("invalid demo document date")?,
            attachment: None,
            intake_role: Role::RecordsOfficer,
        })
        .await?;
    println!("registered {} as {}", doc.reference_number, doc.status);

    engine
        .forward(
            &doc.id,
            Role::RecordsOfficer,
            DocumentStatus::ForwardedToSecretary,
            None,
            Some("registered and forwarded".to_string()),
        )
        .await?;

    if committee {
        engine
            .forward(
                &doc.id,
                Role::BoardSecretary,
                DocumentStatus::SentToCommittee,
                None,
                Some("referred for committee deliberation".to_string()),
            )
            .await?;
        engine
            .add_comment(
                &doc.id,
                Role::BoardCommittee,
                "Committee supports the proposal",
                CommentType::Recommendation,
                Some(Recommendation::Support),
            )
            .await?;
        engine
            .forward(
                &doc.id,
                Role::BoardCommittee,
                DocumentStatus::ReturnedToHrFromCommittee,
                None,
                None,
            )
            .await?;
        engine
            .forward(&doc.id, Role::Hr, DocumentStatus::SentToRecords, None, None)
            .await?;
    } else {
        engine
            .add_comment(
                &doc.id,
                Role::BoardSecretary,
                "Reviewed; recommend approval",
                CommentType::Recommendation,
                Some(Recommendation::Approve),
            )
            .await?;
        engine
            .forward(
                &doc.id,
                Role::BoardSecretary,
                DocumentStatus::SentToChair,
                None,
                None,
            )
            .await?;
        engine
            .add_comment(
                &doc.id,
                Role::BoardChair,
                "Approved by the chair",
                CommentType::Decision,
                Some(Recommendation::Approve),
            )
            .await?;
        engine
            .forward(
                &doc.id,
                Role::BoardChair,
                DocumentStatus::SentToRecords,
                None,
                None,
            )
            .await?;
    }

    engine
        .dispatch(&doc.id, Role::RecordsOfficer, "Approved by the board")
        .await?;
    let filed = engine.file(&doc.id, Role::RecordsOfficer).await?;

    println!("final status: {} (handler {})", filed.status, filed.current_handler);
    println!("\ntransition history:");
    for record in &filed.history {
        println!(
            "  {} -> {} [{} by {}]{}",
            record.from_status,
            record.to_status,
            record.action,
            record.acting_role,
            record
                .notes
                .as_deref()
                .map(|n| format!(" - {n}"))
                .unwrap_or_default()
        );
    }

    println!("\nreview trail:");
    for comment in engine.comments(&doc.id).await? {
        println!(
            "  [{}] {}{}",
            comment.role,
            comment.comment,
            comment
                .recommendation
                .map(|r| format!(" ({r})"))
                .unwrap_or_default()
        );
    }

    Ok(())
}
