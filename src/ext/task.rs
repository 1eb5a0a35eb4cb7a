//! ```` ```task ```` fences: `key: value` lines decoded into a [`TaskCard`].

use super::ExtensionError;
use crate::block::node::{BlockNode, TaskCard, TaskPriority, TaskStatus};
use crate::inline::InlineParser;

pub fn parse(content: &str, _inline: &InlineParser) -> Result<BlockNode, ExtensionError> {
    if content.trim().is_empty() {
        return Err(ExtensionError::Empty);
    }

    let mut title = None;
    let mut task = TaskCard {
        title: String::new(),
        status: TaskStatus::default(),
        priority: TaskPriority::default(),
        due: None,
        tags: Vec::new(),
        block_id: None,
    };

    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "title" | "name" => title = Some(value.to_string()),
            "status" => match parse_status(value) {
                Some(status) => task.status = status,
                None => log::debug!("ignoring unknown task status {value:?}"),
            },
            "priority" => match parse_priority(value) {
                Some(priority) => task.priority = priority,
                None => log::debug!("ignoring unknown task priority {value:?}"),
            },
            "due" | "due_date" | "deadline" => task.due = Some(value.to_string()),
            "tags" => task.tags = parse_tags(value),
            "blockid" | "block_id" | "block" | "ref" => {
                task.block_id = value
                    .trim_start_matches('#')
                    .parse::<u64>()
                    .ok()
                    .filter(|&id| id > 0);
            }
            _ => {}
        }
    }

    task.title = title.ok_or(ExtensionError::MissingField("title"))?;
    Ok(BlockNode::TaskCard { task })
}

fn parse_status(value: &str) -> Option<TaskStatus> {
    let value = value.to_ascii_lowercase().replace(['-', ' '], "_");
    Some(match value.as_str() {
        "todo" | "to_do" | "open" | "pending" => TaskStatus::Todo,
        "in_progress" | "doing" | "active" | "wip" => TaskStatus::InProgress,
        "done" | "completed" | "complete" | "closed" => TaskStatus::Done,
        "cancelled" | "canceled" => TaskStatus::Cancelled,
        _ => return None,
    })
}

fn parse_priority(value: &str) -> Option<TaskPriority> {
    Some(match value.to_ascii_lowercase().as_str() {
        "low" => TaskPriority::Low,
        "medium" | "normal" => TaskPriority::Medium,
        "high" => TaskPriority::High,
        "urgent" | "critical" => TaskPriority::Urgent,
        _ => return None,
    })
}

fn parse_tags(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|tag| tag.trim().trim_start_matches('#'))
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
