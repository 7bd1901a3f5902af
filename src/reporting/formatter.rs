use crate::models::{Category, RemediationDocument};

/// One `description , count` line per finding.
pub fn format_top_findings(entries: &[(String, usize)]) -> String {
    let mut out = String::new();
    for (description, count) in entries {
        out.push_str(&format!("{} , {}\n", description, count));
    }
    out
}

/// Parse a frequency file written by [`format_top_findings`].
pub fn parse_top_findings(content: &str) -> Vec<(String, usize)> {
    content
        .lines()
        .filter_map(|line| {
            let (description, count) = line.rsplit_once(" , ")?;
            Some((description.to_string(), count.trim().parse().ok()?))
        })
        .collect()
}

/// `Website Security: 610 | Email Security: 500 | ...`
fn category_line(doc: &RemediationDocument) -> String {
    [
        Category::WebsiteSecurity,
        Category::EmailSecurity,
        Category::NetworkSecurity,
        Category::Phishing,
        Category::BrandProtection,
    ]
    .iter()
    .map(|c| format!("{}: {}", c.label(), doc.scores.category(*c)))
    .collect::<Vec<_>>()
    .join(" | ")
}

pub fn format_remediation_markdown(doc: &RemediationDocument, date: &str) -> String {
    let mut out = format!(
        "# {} Remediation Report\n\n*Date Created: {}*\n\n**Overall Score {} / 850**\n\n{}\n\n---\n\n",
        doc.title,
        date,
        doc.scores.overall_score,
        category_line(doc),
    );

    if doc.issues.is_empty() {
        out.push_str("No open issues were reported for this host.\n");
        return out;
    }

    for (i, issue) in doc.issues.iter().enumerate() {
        out.push_str(&format!("## Issue #{}: {}\n\n", i + 1, issue.description));
        if let Some(host) = issue.primary_host() {
            out.push_str(&format!("**Host:** {}\n\n", host));
        }
        out.push_str(&format!(
            "**Why is it risky:**\n\n{}\n\n**Description:**\n\n{}\n\n---\n\n",
            issue.risk_reason.as_deref().unwrap_or("Not provided"),
            issue.detail.as_deref().unwrap_or("Not provided"),
        ));
    }
    out
}

pub fn format_remediation_html(doc: &RemediationDocument, date: &str) -> String {
    let mut issues = String::new();
    for (i, issue) in doc.issues.iter().enumerate() {
        issues.push_str(&format!(
            "<section class=\"issue\">\n<h2>Issue #{}: {}</h2>\n{}<p><b>Why is it risky:</b></p>\n<p>{}</p>\n<p><b>Description:</b></p>\n<p>{}</p>\n</section>\n<hr>\n",
            i + 1,
            escape_html(&issue.description),
            issue
                .primary_host()
                .map(|h| format!("<p><b>Host:</b> {}</p>\n", escape_html(h)))
                .unwrap_or_default(),
            escape_html(issue.risk_reason.as_deref().unwrap_or("Not provided")),
            escape_html(issue.detail.as_deref().unwrap_or("Not provided")),
        ));
    }
    if issues.is_empty() {
        issues.push_str("<p>No open issues were reported for this host.</p>\n");
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title} Remediation Report</title>\n<style>\nbody {{ font-family: Helvetica, Arial, sans-serif; max-width: 800px; margin: 2em auto; }}\nh1 {{ color: green; text-align: center; }}\n.overall {{ text-align: center; font-size: 1.2em; }}\n</style>\n</head>\n<body>\n<h1>{title} Remediation Report</h1>\n<p><i>Date Created: {date}</i></p>\n<p class=\"overall\">Overall Score {overall} / 850</p>\n<p>{categories}</p>\n<hr>\n{issues}</body>\n</html>\n",
        title = escape_html(&doc.title),
        date = escape_html(date),
        overall = doc.scores.overall_score,
        categories = escape_html(&category_line(doc)),
        issues = issues,
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
