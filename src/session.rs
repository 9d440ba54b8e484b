//! The command interface an interactive front end drives the tree through
//!
//! A `Session` owns a `BSTSet` and applies one `Command` at a time. After every insert or erase
//! (whether or not it changed the tree) the tree is validated. A broken tree is fatal: the command
//! fails with `SessionError::NotBst` and every later command fails with `SessionError::Aborted`.

use std::fmt;

use log::{debug, error};
use thiserror::Error;

use crate::set::{BSTSet, InvariantViolation, DEFAULT_INDENT};

/// Settings for a `Session`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Number of spaces each level of the tree is indented by when printing
    pub indent: usize,
    /// Whether to validate the tree after every insert and erase
    pub validate_after_mutation: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            validate_after_mutation: true,
        }
    }
}

impl SessionConfig {
    pub fn with_indent(self, indent: usize) -> Self {
        Self {indent, ..self}
    }

    pub fn with_validation(self, validate_after_mutation: bool) -> Self {
        Self {validate_after_mutation, ..self}
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<K> {
    /// Insert a key into the tree
    Insert(K),
    /// Remove a key from the tree
    Erase(K),
    /// Render the tree
    Print,
    /// Check the tree's invariants without changing it
    Validate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<K> {
    Inserted(K),
    AlreadyExists(K),
    Erased(K),
    NotFound(K),
    /// The rendered tree, empty if the tree is empty
    Rendered(String),
    Valid,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("tree is no longer a binary search tree: {0}")]
    NotBst(#[from] InvariantViolation),

    #[error("session was aborted after the tree stopped being a binary search tree")]
    Aborted,
}

#[derive(Debug, Clone)]
pub struct Session<K> {
    tree: BSTSet<K>,
    config: SessionConfig,
    aborted: bool,
}

impl<K> Default for Session<K> {
    fn default() -> Self {
        Self::with_config(SessionConfig::default())
    }
}

impl<K> Session<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self::from_tree(BSTSet::new(), config)
    }

    /// Starts a session on an existing tree
    pub fn from_tree(tree: BSTSet<K>, config: SessionConfig) -> Self {
        Self {
            tree,
            config,
            aborted: false,
        }
    }

    pub fn tree(&self) -> &BSTSet<K> {
        &self.tree
    }

    pub fn into_tree(self) -> BSTSet<K> {
        self.tree
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns true once a command has found the tree broken
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }
}

impl<K> Session<K>
    where K: Ord + Clone + fmt::Debug + fmt::Display,
{
    /// Applies a single command to the tree
    ///
    /// Inserting an existing key or erasing a missing one is not an error, it is reported through
    /// the returned `Outcome`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Command, Outcome, Session};
    ///
    /// let mut session = Session::new();
    /// assert_eq!(session.apply(Command::Insert(5)), Ok(Outcome::Inserted(5)));
    /// assert_eq!(session.apply(Command::Insert(5)), Ok(Outcome::AlreadyExists(5)));
    /// assert_eq!(session.apply(Command::Insert(3)), Ok(Outcome::Inserted(3)));
    /// assert_eq!(session.apply(Command::Print), Ok(Outcome::Rendered("5\n  l: 3".to_string())));
    /// assert_eq!(session.apply(Command::Erase(4)), Ok(Outcome::NotFound(4)));
    /// ```
    pub fn apply(&mut self, command: Command<K>) -> Result<Outcome<K>, SessionError> {
        if self.aborted {
            return Err(SessionError::Aborted);
        }
        debug!("applying {:?}", command);

        let outcome = match command {
            Command::Insert(key) => {
                let outcome = if self.tree.insert(key.clone()) {
                    Outcome::Inserted(key)
                } else {
                    Outcome::AlreadyExists(key)
                };
                self.check_after_mutation()?;
                outcome
            },

            Command::Erase(key) => {
                let outcome = if self.tree.remove(&key) {
                    Outcome::Erased(key)
                } else {
                    Outcome::NotFound(key)
                };
                self.check_after_mutation()?;
                outcome
            },

            Command::Print => Outcome::Rendered(self.tree.render_with_indent(self.config.indent)),

            Command::Validate => {
                self.check()?;
                Outcome::Valid
            },
        };

        debug!("{:?}", outcome);
        Ok(outcome)
    }

    fn check_after_mutation(&mut self) -> Result<(), SessionError> {
        if self.config.validate_after_mutation {
            self.check()?;
        }

        Ok(())
    }

    fn check(&mut self) -> Result<(), SessionError> {
        if let Err(violation) = self.tree.validate() {
            error!("aborting session: {}", violation);
            self.aborted = true;
            return Err(violation.into());
        }

        Ok(())
    }
}
