//! Built-in sample documents.
//!
//! Three fixed templates that can seed the editor from the template menu.
//! Loading one always replaces the whole document.

/// Identifier for one of the built-in templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Feature tour: one of everything the preview can render
    Welcome,
    /// Project README skeleton
    Readme,
    /// Meeting notes skeleton
    MeetingNotes,
}

impl Template {
    /// All templates in menu order.
    pub const ALL: [Self; 3] = [Self::Welcome, Self::Readme, Self::MeetingNotes];

    /// Human-readable name shown in the template menu and toasts.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome tour",
            Self::Readme => "Project README",
            Self::MeetingNotes => "Meeting notes",
        }
    }

    /// The template's literal markdown text.
    pub const fn content(self) -> &'static str {
        match self {
            Self::Welcome => WELCOME,
            Self::Readme => README,
            Self::MeetingNotes => MEETING_NOTES,
        }
    }

    /// Look up a template by its menu digit (1-based).
    pub const fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Self::Welcome),
            '2' => Some(Self::Readme),
            '3' => Some(Self::MeetingNotes),
            _ => None,
        }
    }
}

const WELCOME: &str = r#"# Welcome to markpane

Type in the left pane and watch the preview update on the right.
Drag the divider to resize the panes, or press `Ctrl+F` to zoom the
focused pane.

## Formatting

Text can be **bold**, *italic*, ~~struck through~~ or `inline code`.
Links render like [this one](https://example.com).

> Blockquotes are indented and dimmed, and can span
> multiple lines.

## Lists

- Unordered items
- Nest as deep
  - as you like
1. Ordered items
2. Count themselves

## Code

```rust
fn main() {
    println!("highlighted with syntect");
}
```

## Tables

| Key      | Action            |
| -------- | ----------------- |
| `Ctrl+O` | Open a file       |
| `Ctrl+T` | Template menu     |
| `Ctrl+E` | Export menu       |

---

Export this document with `Ctrl+E` as Markdown, HTML, PDF or DOCX.
"#;

const README: &str = r#"# Project Name

One-paragraph summary of what the project does and who it is for.

## Installation

```bash
cargo install project-name
```

## Usage

```bash
project-name input.md
```

Describe the most common invocation first; move exotic flags to a
reference section.

## Configuration

| Option    | Default | Description              |
| --------- | ------- | ------------------------ |
| `theme`   | `auto`  | Color theme              |
| `verbose` | `false` | Enable detailed logging  |

## Contributing

1. Fork the repository
2. Create a feature branch
3. Open a pull request

## License

MIT
"#;

const MEETING_NOTES: &str = r#"# Meeting Notes: <date>

**Attendees:** Alice, Bob, Carol

## Agenda

1. Project status
2. Open risks
3. Next milestones

## Discussion

- Status: on track for the current milestone.
- Risks: *add risks discussed here.*

> Decision: record each decision as a quoted line so it stands out.

## Action Items

- [ ] Owner: action item with a due date
- [ ] Owner: another action item

## Next Meeting

Same time next week.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_templates() {
        assert_eq!(Template::ALL.len(), 3);
    }

    #[test]
    fn test_templates_are_nonempty_and_distinct() {
        for t in Template::ALL {
            assert!(!t.content().is_empty());
        }
        assert_ne!(Template::Welcome.content(), Template::Readme.content());
        assert_ne!(Template::Readme.content(), Template::MeetingNotes.content());
    }

    #[test]
    fn test_from_digit() {
        assert_eq!(Template::from_digit('1'), Some(Template::Welcome));
        assert_eq!(Template::from_digit('3'), Some(Template::MeetingNotes));
        assert_eq!(Template::from_digit('4'), None);
        assert_eq!(Template::from_digit('a'), None);
    }

    #[test]
    fn test_content_is_stable() {
        // Templates are immutable literals; two reads must be identical.
        assert_eq!(Template::Welcome.content(), Template::Welcome.content());
    }
}
