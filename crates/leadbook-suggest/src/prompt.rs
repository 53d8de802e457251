use leadbook_core::rules::interested_service_names;
use leadbook_core::{Client, ServiceOption};

use crate::{PromptKind, Tone};

pub const NO_WEBSITE: &str = "No website found";
pub const DEFAULT_SERVICES: &str = "SEO & Digital Marketing";

/// Everything a prompt may mention about a prospect, resolved up front so the
/// request can be sent without holding on to the workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProspectContext {
    pub contact_name: String,
    pub company: String,
    pub industry: String,
    /// Empty when the client has no website.
    pub website: String,
    pub audit_notes: String,
    /// Names of catalog services the client is interested in.
    pub services: Vec<String>,
    /// Interaction notes, oldest first, one per line.
    pub interaction_notes: String,
}

impl ProspectContext {
    pub fn from_client(client: &Client, services: &[ServiceOption]) -> Self {
        let interaction_notes = client
            .interactions
            .iter()
            .map(|i| format!("- {} {}: {}", i.date, i.kind, i.notes))
            .collect::<Vec<_>>()
            .join("\n");

        ProspectContext {
            contact_name: client.name.clone(),
            company: client.company.clone(),
            industry: client.industry.clone(),
            website: client.website.trim().to_string(),
            audit_notes: client.project_notes.clone(),
            services: interested_service_names(client, services)
                .into_iter()
                .map(str::to_string)
                .collect(),
            interaction_notes,
        }
    }

    /// Context carrying only free-text call notes, for ad-hoc analysis.
    pub fn from_notes(notes: impl Into<String>) -> Self {
        ProspectContext {
            interaction_notes: notes.into(),
            ..ProspectContext::default()
        }
    }

    pub fn website_or_marker(&self) -> &str {
        if self.website.is_empty() {
            NO_WEBSITE
        } else {
            &self.website
        }
    }

    pub fn services_line(&self) -> String {
        if self.services.is_empty() {
            DEFAULT_SERVICES.to_string()
        } else {
            self.services.join(", ")
        }
    }
}

fn tone_str(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => "professional",
        Tone::Casual => "casual",
        Tone::Urgent => "urgent",
    }
}

pub fn cold_call_script(ctx: &ProspectContext) -> String {
    format!(
        "Act as a world-class sales expert. Write a persuasive, concise cold call script for a \
potential client found on Google Maps.\n\n\
Client Details:\n\
- Name: {name}\n\
- Company: {company}\n\
- Industry: {industry}\n\
- Website: {website}\n\n\
My Audit / Observations (What needs to be done):\n\
\"{notes}\"\n\n\
Services Pitching: {services}\n\n\
The script should:\n\
1. Reference the specific issues found on their website/online presence (from the audit notes).\n\
2. Be professional but friendly.\n\
3. Offer a clear value proposition.\n\
4. Keep it under 200 words.",
        name = ctx.contact_name,
        company = ctx.company,
        industry = ctx.industry,
        website = ctx.website_or_marker(),
        notes = ctx.audit_notes,
        services = ctx.services_line(),
    )
}

pub fn interaction_analysis(ctx: &ProspectContext) -> String {
    format!(
        "Analyze the following sales call notes and provide 3 bullet points on the next best \
actions to take to close the deal:\n\"{}\"",
        ctx.interaction_notes
    )
}

pub fn email_draft(ctx: &ProspectContext, tone: Tone) -> String {
    format!(
        "Draft a {tone} cold outreach or follow-up email to {name} from {company}.\n\n\
Context:\n\
- We found them on Google Maps.\n\
- Website: {website}\n\
- Specific Problem Identified: {notes}\n\
- Services we can offer: {services}\n\n\
Goal: Book a meeting to discuss how we can fix these issues.\n\
Include a catchy subject line.",
        tone = tone_str(tone),
        name = ctx.contact_name,
        company = ctx.company,
        website = ctx.website_or_marker(),
        notes = ctx.audit_notes,
        services = ctx.services_line(),
    )
}

pub fn render(kind: PromptKind, ctx: &ProspectContext) -> String {
    match kind {
        PromptKind::ColdCallScript => cold_call_script(ctx),
        PromptKind::InteractionAnalysis => interaction_analysis(ctx),
        PromptKind::EmailDraft(tone) => email_draft(ctx, tone),
    }
}
