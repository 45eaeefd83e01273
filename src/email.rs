//! Canned email drafts

use std::fmt;

const COMPLAINT_SUBJECT_CHARS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    LeaveRequest,
    Complaint,
    Internship,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub subject: String,
    pub body: String,
}

impl fmt::Display for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subject: {}\n\n{}", self.subject, self.body)
    }
}

impl EmailTemplate {
    pub const ALL: [EmailTemplate; 4] = [
        EmailTemplate::LeaveRequest,
        EmailTemplate::Complaint,
        EmailTemplate::Internship,
        EmailTemplate::Custom,
    ];

    /// Menu number (1-4) to template.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(EmailTemplate::LeaveRequest),
            "2" => Some(EmailTemplate::Complaint),
            "3" => Some(EmailTemplate::Internship),
            "4" => Some(EmailTemplate::Custom),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmailTemplate::LeaveRequest => "Sick/holiday leave request",
            EmailTemplate::Complaint => "Customer complaint",
            EmailTemplate::Internship => "Internship inquiry",
            EmailTemplate::Custom => "Custom quick draft",
        }
    }

    /// Prompts for the values `render` expects, in order.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            EmailTemplate::LeaveRequest => &[
                "Your name",
                "Reason (e.g. 'fever' or 'vacation')",
                "How many days?",
            ],
            EmailTemplate::Complaint => &[
                "What's the problem in one sentence?",
                "Your name/account #",
            ],
            EmailTemplate::Internship => &[
                "Your name",
                "What field are you looking in? (e.g. 'Data Science')",
            ],
            EmailTemplate::Custom => &["Subject", "Body"],
        }
    }

    /// Fill the template. Missing values render as empty strings.
    pub fn render(&self, values: &[String]) -> Draft {
        let value = |i: usize| values.get(i).map(|v| v.trim()).unwrap_or("");

        match self {
            EmailTemplate::LeaveRequest => {
                let (name, reason, days) = (value(0), value(1), value(2));
                Draft {
                    subject: format!("Formal Leave Request - {name}"),
                    body: format!(
                        "Dear [Manager's Name],\n\n\
                         I am writing to formally request {days} day(s) of leave due to {reason}. \
                         I plan to be back on [Insert Date].\n\n\
                         Thanks in advance,\n\n\
                         {name}"
                    ),
                }
            }
            EmailTemplate::Complaint => {
                let (issue, handle) = (value(0), value(1));
                let short: String = issue.chars().take(COMPLAINT_SUBJECT_CHARS).collect();
                Draft {
                    subject: format!("URGENT: Complaint Regarding {short}..."),
                    body: format!(
                        "Dear Support/Customer Service Team,\n\n\
                         I am severely disappointed with {issue}. \
                         I expect a resolution within 24 hours.\n\n\
                         Sincerely,\n\n\
                         {handle}"
                    ),
                }
            }
            EmailTemplate::Internship => {
                let (name, field) = (value(0), value(1));
                Draft {
                    subject: "Internship Application - [Your University]".to_string(),
                    body: format!(
                        "Dear Hiring Team,\n\n\
                         I'm a student/recent grad interested in an internship in {field}. \
                         I've attached my CV for your review and look forward to hearing from you.\n\n\
                         Best regards,\n\n\
                         {name}"
                    ),
                }
            }
            EmailTemplate::Custom => Draft {
                subject: value(0).to_string(),
                body: value(1).to_string(),
            },
        }
    }
}
