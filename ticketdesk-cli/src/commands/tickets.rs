//! Tickets command - talk to a running ticketdesk server
//!
//! Every subcommand prints JSON to stdout: the server's reply, or for
//! `triage` the keyword triage of a stored ticket.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;

use ticketdesk_server::client::DEFAULT_SERVER_URL;
use ticketdesk_server::models::{default_agents, triage, Agent};
use ticketdesk_server::{TicketClient, TicketFields};

#[derive(Parser, Debug)]
#[command(about = "Create, list, update and delete tickets on a ticketdesk server")]
pub struct TicketsArgs {
    /// Server base URL
    #[arg(long, env = "TICKETDESK_SERVER", default_value = DEFAULT_SERVER_URL, global = true)]
    pub server: String,

    #[command(subcommand)]
    pub command: TicketsCommand,
}

#[derive(Subcommand, Debug)]
pub enum TicketsCommand {
    /// List tickets
    List {
        /// Only tickets whose status is "pending"
        #[arg(long)]
        pending: bool,
    },
    /// Create a ticket
    Create(TicketInput),
    /// Replace every field of a ticket
    Update {
        /// Ticket id
        ticket_id: i64,
        #[command(flatten)]
        input: TicketInput,
    },
    /// Delete a ticket
    Delete {
        /// Ticket id
        ticket_id: i64,
    },
    /// Suggest priority, assignee and a first reply for a ticket
    Triage {
        /// Ticket id
        ticket_id: i64,
        /// JSON file with the agent roster (defaults to the built-in roster)
        #[arg(long)]
        agents: Option<PathBuf>,
    },
}

/// Ticket fields as command-line flags
#[derive(Args, Debug)]
pub struct TicketInput {
    /// Short ticket name
    #[arg(long)]
    pub ticket_name: String,
    /// Ticket title
    #[arg(long)]
    pub title: String,
    /// Problem description
    #[arg(long)]
    pub description: String,
    /// Customer name
    #[arg(long)]
    pub customer_name: String,
    /// Customer email
    #[arg(long)]
    pub customer_email: String,
    /// Status, e.g. "pending"
    #[arg(long)]
    pub status: Option<String>,
    /// Priority
    #[arg(long)]
    pub priority: Option<String>,
}

impl From<TicketInput> for TicketFields {
    fn from(input: TicketInput) -> Self {
        Self {
            ticket_name: input.ticket_name,
            title: input.title,
            description: input.description,
            customer_name: input.customer_name,
            customer_email: input.customer_email,
            status: input.status,
            priority: input.priority,
        }
    }
}

/// Agent roster from `path`, or the built-in one.
fn load_agents(path: Option<&Path>) -> Result<Vec<Agent>> {
    let Some(path) = path else {
        return Ok(default_agents());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read agent roster {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid agent roster {}", path.display()))
}

pub async fn run_tickets(args: TicketsArgs) -> Result<()> {
    let client = TicketClient::new(&args.server);

    let output = match args.command {
        TicketsCommand::List { pending } => {
            let tickets = client
                .list(pending)
                .await
                .context("Failed to list tickets")?;
            serde_json::to_value(tickets)?
        }
        TicketsCommand::Create(input) => {
            let ticket = client
                .create(&input.into())
                .await
                .context("Failed to create ticket")?;
            serde_json::to_value(ticket)?
        }
        TicketsCommand::Update { ticket_id, input } => {
            let ticket = client
                .update(ticket_id, &input.into())
                .await
                .with_context(|| format!("Failed to update ticket {}", ticket_id))?;
            serde_json::to_value(ticket)?
        }
        TicketsCommand::Delete { ticket_id } => {
            let message = client
                .delete(ticket_id)
                .await
                .with_context(|| format!("Failed to delete ticket {}", ticket_id))?;
            json!({ "message": message })
        }
        TicketsCommand::Triage { ticket_id, agents } => {
            let agents = load_agents(agents.as_deref())?;
            let tickets = client
                .list(false)
                .await
                .context("Failed to list tickets")?;
            let ticket = tickets
                .iter()
                .find(|t| t.ticket_id == ticket_id)
                .ok_or_else(|| anyhow!("Ticket {} not found", ticket_id))?;
            let result =
                triage(ticket, &agents).ok_or_else(|| anyhow!("Agent roster is empty"))?;
            tracing::debug!(ticket_id, priority = ?result.priority, "triaged ticket");
            json!({ "ticket_id": ticket_id, "triage": result })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
