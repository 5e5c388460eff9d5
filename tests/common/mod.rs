//! Test doubles shared by the integration tests
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

use aws_key_updater::console::{Console, Key};
use aws_key_updater::iam::{AccessKey, AccessKeyMetadata, KeyError, KeyService, KeyStatus, Result};
use chrono::{TimeZone, Utc};

pub const USER: &str = "deploy";

/// IAM allows two keys per user
pub const KEY_LIMIT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create,
    Delete(String),
    List,
}

#[derive(Default)]
struct State {
    keys: Vec<AccessKeyMetadata>,
    created: u32,
    calls: Vec<Call>,
}

/// In-memory stand-in for IAM, scoped to a single user
pub struct MemoryKeyService {
    state: RefCell<State>,
    /// When set, every list call fails with this HTTP status
    list_status: Option<Option<u16>>,
}

impl MemoryKeyService {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(State::default()),
            list_status: None,
        }
    }

    pub fn with_keys(ids: &[&str]) -> Self {
        let service = Self::new();
        {
            let mut state = service.state.borrow_mut();
            for (i, id) in ids.iter().enumerate() {
                state.keys.push(AccessKeyMetadata {
                    id: id.to_string(),
                    user_name: USER.to_string(),
                    status: KeyStatus::Active,
                    create_date: Utc.with_ymd_and_hms(2024, 3, 4 + i as u32, 10, 15, 0).single(),
                });
            }
        }
        service
    }

    /// A service whose list calls fail; `None` means no HTTP response at all
    pub fn failing_list(status: Option<u16>) -> Self {
        Self {
            state: RefCell::new(State::default()),
            list_status: Some(status),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Delete(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn key_ids(&self) -> Vec<String> {
        self.state.borrow().keys.iter().map(|k| k.id.clone()).collect()
    }
}

impl KeyService for MemoryKeyService {
    async fn create_access_key(&self) -> Result<AccessKey> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::Create);

        if state.keys.len() >= KEY_LIMIT {
            return Err(KeyError::Service {
                code: Some("LimitExceeded".to_string()),
                message: format!("Cannot exceed quota for AccessKeysPerUser: {}", KEY_LIMIT),
                status: Some(409),
            });
        }

        state.created += 1;
        let key = AccessKey {
            id: format!("AKIAMEMORY{:010}", state.created),
            secret: format!("memory-secret-{}", state.created),
            user_name: USER.to_string(),
            status: KeyStatus::Active,
            create_date: Some(Utc::now()),
        };
        state.keys.push(key.metadata());
        Ok(key)
    }

    async fn delete_access_key(&self, key_id: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::Delete(key_id.to_string()));

        match state.keys.iter().position(|k| k.id == key_id) {
            Some(pos) => {
                state.keys.remove(pos);
                Ok(())
            }
            None => Err(KeyError::Service {
                code: Some("NoSuchEntity".to_string()),
                message: format!("The Access Key with id {} cannot be found.", key_id),
                status: Some(404),
            }),
        }
    }

    async fn list_access_keys(&self) -> Result<Vec<AccessKeyMetadata>> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::List);

        if let Some(status) = self.list_status {
            return Err(KeyError::Service {
                code: Some("InvalidClientTokenId".to_string()),
                message: "The security token included in the request is invalid.".to_string(),
                status,
            });
        }
        Ok(state.keys.clone())
    }
}

pub enum Input {
    Line(String),
    Key(Key),
}

/// Console fed from a script; running out of input reads as end-of-file
#[derive(Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<Input>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, text: &str) -> Self {
        self.inputs.push_back(Input::Line(text.to_string()));
        self
    }

    pub fn key(mut self, c: char) -> Self {
        self.inputs.push_back(Input::Key(Key::Char(c)));
        self
    }

    pub fn escape(mut self) -> Self {
        self.inputs.push_back(Input::Key(Key::Escape));
        self
    }

    pub fn credentials(self, region: &str, id: &str, secret: &str) -> Self {
        self.line(region).line(id).line(secret)
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    pub fn count(&self, line: &str) -> usize {
        self.output.iter().filter(|l| l.as_str() == line).count()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.output.iter().any(|l| l.contains(needle))
    }

    fn next(&mut self, prompt: &str) -> io::Result<Input> {
        self.prompts.push(prompt.to_string());
        self.inputs
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn next_line(&mut self, prompt: &str) -> io::Result<String> {
        match self.next(prompt)? {
            Input::Line(text) => Ok(text),
            Input::Key(key) => panic!("expected a line for {:?}, script has {:?}", prompt, key),
        }
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.next_line(prompt)
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.next_line(prompt)
    }

    fn read_key(&mut self, prompt: &str) -> io::Result<Key> {
        match self.next(prompt)? {
            Input::Key(key) => Ok(key),
            Input::Line(text) => panic!("expected a key for {:?}, script has {:?}", prompt, text),
        }
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}
