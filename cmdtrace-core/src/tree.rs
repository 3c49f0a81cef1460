// cmdtrace-core/src/tree.rs
//! The abstract command tree handed over by the host CLI framework.
//!
//! A node is either a [`Group`] (a named collection of child nodes) or a
//! [`Command`] (a terminal command with its registered option-strings and the
//! help text the host renders for it). Hosts build this once per invocation;
//! the library only ever reads it.
//!
//! License: MIT OR APACHE 2.0

/// A node of the host CLI's command hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandTree {
    Group(Group),
    Command(Command),
}

impl CommandTree {
    /// The name reported by the host, if any. Only groups may be unnamed.
    pub fn name(&self) -> Option<&str> {
        match self {
            CommandTree::Group(group) => group.name(),
            CommandTree::Command(command) => Some(command.name()),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, CommandTree::Group(_))
    }
}

impl From<Group> for CommandTree {
    fn from(group: Group) -> Self {
        CommandTree::Group(group)
    }
}

impl From<Command> for CommandTree {
    fn from(command: Command) -> Self {
        CommandTree::Command(command)
    }
}

/// An aggregate command whose children are keyed by unique name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    name: Option<String>,
    children: Vec<CommandTree>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            children: Vec::new(),
        }
    }

    /// A group the host reports without a name, typically the top-level dispatcher.
    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn children(&self) -> &[CommandTree] {
        &self.children
    }

    /// Adds a child node. A child with the same name as an existing one
    /// replaces it in place, keeping names unique within the group.
    pub fn add_child(&mut self, child: impl Into<CommandTree>) {
        let child = child.into();
        let existing = child.name().and_then(|name| {
            self.children
                .iter()
                .position(|c| c.name() == Some(name))
        });
        match existing {
            Some(idx) => self.children[idx] = child,
            None => self.children.push(child),
        }
    }

    pub fn with_child(mut self, child: impl Into<CommandTree>) -> Self {
        self.add_child(child);
        self
    }
}

/// A terminal command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    option_strings: Vec<String>,
    help: String,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            option_strings: Vec::new(),
            help: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every surface spelling registered for this command's flags, e.g. both
    /// `-c` and `--config` for one logical option.
    pub fn option_strings(&self) -> &[String] {
        &self.option_strings
    }

    /// Registers an option-string; duplicates are ignored.
    pub fn add_option(&mut self, option: impl Into<String>) {
        let option = option.into();
        if !self.option_strings.contains(&option) {
            self.option_strings.push(option);
        }
    }

    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.add_option(option);
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for option in options {
            self.add_option(option);
        }
        self
    }

    /// Stores the help text as rendered by the host framework.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// The host-rendered help text for this command.
    pub fn render_help(&self) -> &str {
        &self.help
    }
}
