//! Keyword triage - priority, suggested assignee and a canned first reply.
//!
//! Purely rule based: the ticket's title and description are lowercased and
//! searched for keywords. Nothing is written back to the store.

use serde::{Deserialize, Serialize};

use super::Ticket;

/// Triage priority, `P0` most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

/// A support agent that tickets can be routed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
    /// Open tickets currently assigned
    pub workload: u32,
}

impl Agent {
    pub fn new(name: &str, email: &str, skills: &[&str], workload: u32) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            workload,
        }
    }
}

/// The built-in support roster
pub fn default_agents() -> Vec<Agent> {
    vec![
        Agent::new("Sarah Chen", "sarah@company.com", &["billing", "payments", "refunds"], 3),
        Agent::new("Mike Rodriguez", "mike@company.com", &["technical", "api", "integration"], 5),
        Agent::new("Emma Thompson", "emma@company.com", &["account", "onboarding", "general"], 2),
        Agent::new("David Kim", "david@company.com", &["security", "compliance", "technical"], 4),
    ]
}

/// Outcome of triaging one ticket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Triage {
    pub priority: Priority,
    pub priority_reason: String,
    pub suggested_assignee: Agent,
    pub assignment_reason: String,
    pub suggested_response: String,
}

const PRIORITY_RULES: &[(&[&str], Priority, &str)] = &[
    (
        &["urgent", "critical", "down", "outage"],
        Priority::P0,
        "Contains urgent keywords indicating critical system issues",
    ),
    (
        &["billing", "payment", "refund", "charge"],
        Priority::P1,
        "Financial/billing issues require prompt attention",
    ),
    (
        &["bug", "error", "broken", "not working"],
        Priority::P1,
        "Technical issues affecting user experience",
    ),
    (
        &["question", "how to", "help"],
        Priority::P3,
        "General inquiry or support question",
    ),
];

const DEFAULT_PRIORITY_REASON: &str = "Standard support request requiring normal response time";

const BILLING_RESPONSE: &str = "Thank you for contacting us about your billing inquiry. \
I've reviewed your account and will investigate this charge immediately. \
You should expect a resolution within 24 hours. \
If this was an error on our part, we'll process a full refund right away.";

const TECHNICAL_RESPONSE: &str = "Thanks for reporting this technical issue. \
I've escalated this to our engineering team for immediate investigation. \
In the meantime, please try clearing your browser cache and cookies. \
We'll update you within 4 hours with our findings.";

const URGENT_RESPONSE: &str = "I understand this is urgent and affecting your business operations. \
I've immediately escalated this to our senior technical team and they're investigating now. \
I'll personally monitor this issue and provide updates every 30 minutes until resolved.";

const GENERAL_RESPONSE: &str = "Thank you for reaching out! \
I've received your request and will review it carefully. \
I'll get back to you within 24 hours with a detailed response. \
If you have any additional questions in the meantime, please don't hesitate to ask.";

fn mentions_any(content: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| content.contains(k))
}

/// Lowercased text the rules are matched against
fn content(title: &str, description: &str) -> String {
    format!("{title} {description}").to_lowercase()
}

/// First matching priority rule, or `P2` when nothing matches.
pub fn priority_for(title: &str, description: &str) -> (Priority, &'static str) {
    let content = content(title, description);
    PRIORITY_RULES
        .iter()
        .find(|(keywords, _, _)| mentions_any(&content, keywords))
        .map(|&(_, priority, reason)| (priority, reason))
        .unwrap_or((Priority::P2, DEFAULT_PRIORITY_REASON))
}

/// Lowest workload wins; on a tie the later agent is kept.
fn least_loaded<'a>(agents: impl IntoIterator<Item = &'a Agent>) -> Option<&'a Agent> {
    agents
        .into_iter()
        .reduce(|best, next| if best.workload < next.workload { best } else { next })
}

/// Pick an agent whose skills appear in the ticket, falling back to the
/// whole roster. `None` only when `agents` is empty.
pub fn suggest_assignee<'a>(
    title: &str,
    description: &str,
    agents: &'a [Agent],
) -> Option<(&'a Agent, String)> {
    let content = content(title, description);
    let skilled: Vec<&Agent> = agents
        .iter()
        .filter(|a| a.skills.iter().any(|s| content.contains(s.as_str())))
        .collect();

    if let Some(agent) = least_loaded(skilled) {
        let matched: Vec<&str> = agent
            .skills
            .iter()
            .map(String::as_str)
            .filter(|s| content.contains(s))
            .collect();
        let reason = format!(
            "Best match based on skills: {} and current workload ({} tickets)",
            matched.join(", "),
            agent.workload
        );
        return Some((agent, reason));
    }

    least_loaded(agents).map(|agent| {
        let reason = format!(
            "Assigned to agent with lowest workload ({} tickets)",
            agent.workload
        );
        (agent, reason)
    })
}

/// Canned first reply keyed on the ticket's subject matter.
pub fn suggested_response(title: &str, description: &str) -> &'static str {
    let content = content(title, description);
    if mentions_any(&content, &["billing", "payment"]) {
        BILLING_RESPONSE
    } else if mentions_any(&content, &["technical", "bug", "error"]) {
        TECHNICAL_RESPONSE
    } else if mentions_any(&content, &["urgent", "critical"]) {
        URGENT_RESPONSE
    } else {
        GENERAL_RESPONSE
    }
}

/// Triage `ticket` against `agents`. `None` when the roster is empty.
pub fn triage(ticket: &Ticket, agents: &[Agent]) -> Option<Triage> {
    let title = ticket.fields.title.as_str();
    let description = ticket.fields.description.as_str();

    let (agent, assignment_reason) = suggest_assignee(title, description, agents)?;
    let (priority, priority_reason) = priority_for(title, description);

    Some(Triage {
        priority,
        priority_reason: priority_reason.to_string(),
        suggested_assignee: agent.clone(),
        assignment_reason,
        suggested_response: suggested_response(title, description).to_string(),
    })
}
