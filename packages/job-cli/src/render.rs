//! Plain-text rendering, one line per job.

use job_sync::JobView;

pub fn job_line(job: &JobView) -> String {
    let marker = if job.is_bookmarked() { "*" } else { " " };
    let record = &job.record;
    let mut line = format!("{:>6} {} {} @ {}", record.id.0, marker, record.title, record.company);

    if !record.primary_details.place.is_empty() {
        line.push_str(&format!(" ({})", record.primary_details.place));
    }

    let tags = job.tag_labels();
    if !tags.is_empty() {
        line.push_str(&format!(" [{}]", tags.join(", ")));
    }
    line
}

pub fn print_jobs(jobs: &[JobView]) {
    for job in jobs {
        println!("{}", job_line(job));
    }
}

/// Detailed multi-line view for `show`.
pub fn print_job_detail(job: &JobView) {
    for line in detail_lines(job) {
        println!("{line}");
    }
}

fn detail_lines(job: &JobView) -> Vec<String> {
    let record = &job.record;
    let details = &record.primary_details;
    let mut lines = vec![job_line(job)];

    for (label, value) in [
        ("Salary", &details.salary),
        ("Job type", &details.job_type),
        ("Experience", &details.experience),
        ("Qualification", &details.qualification),
        ("Fees", &details.fees_charged),
        ("Category", &record.category),
        ("Role", &record.role),
        ("Phone", &record.phone),
    ] {
        if !value.is_empty() {
            lines.push(format!("  {label}: {value}"));
        }
    }
    if let Some(openings) = record.openings_count {
        lines.push(format!("  Openings: {openings}"));
    }

    let Some(attrs) = &job.transient else {
        return lines;
    };
    for tag in &attrs.tags {
        match tag.background() {
            Some(color) => lines.push(format!("  Tag: {} ({color})", tag.label())),
            None => lines.push(format!("  Tag: {}", tag.label())),
        }
    }
    if let Some(pref) = &attrs.contact_preference {
        if let Some((start, end)) = pref.call_window() {
            lines.push(format!("  Call between: {start} - {end}"));
        }
        if let Some(link) = pref.deep_link() {
            lines.push(format!("  WhatsApp: {link}"));
        }
    }
    for source in attrs.creatives.iter().filter_map(|c| c.source()) {
        lines.push(format!("  Image: {source}"));
    }
    for item in &attrs.extended_content {
        lines.push(format!("  {}: {}", item.label, item.value));
    }
    lines
}
