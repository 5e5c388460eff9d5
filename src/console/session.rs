//! Credential prompting and the interactive menus
//!
//! Flow: prompt for credentials, validate them with a trial list call
//! (repeating until it answers 200), then run the main menu until the user
//! leaves. Remote failures inside the menu are printed and never end the
//! session.

use std::future::Future;

use crate::console::{Console, Key};
use crate::iam::types::{deleted_lines, list_lines, AccessKeyMetadata};
use crate::iam::{KeyService, Result, SessionCredentials, DEFAULT_REGION};

const INVALID_SELECTION: &str = "Invalid selection.";
const NO_KEYS: &str = "No access keys found.";

/// Prompt until a set of credentials passes validation.
///
/// `connect` builds a service for each attempt. Only console I/O errors end
/// the loop early.
pub async fn sign_in<C, S, F, Fut>(console: &mut C, mut connect: F) -> Result<Session<S>>
where
    C: Console,
    S: KeyService,
    F: FnMut(SessionCredentials) -> Fut,
    Fut: Future<Output = S>,
{
    loop {
        let region = console.read_line(&format!("Region [{}]: ", DEFAULT_REGION))?;
        let access_key_id = console.read_line("Access key ID: ")?;
        let secret_access_key = console.read_secret("Secret access key: ")?;

        let credentials = SessionCredentials::new(&region, &access_key_id, &secret_access_key);
        tracing::debug!("Validating {:?}", credentials);

        let service = connect(credentials).await;
        match service.probe().await {
            Ok(200) => {
                console.write_line("Credentials validated.")?;
                return Ok(Session::new(service));
            }
            Ok(status) => {
                tracing::warn!("Credential check returned HTTP {}", status);
                console.write_line(&format!(
                    "Unable to validate credentials (HTTP {}). Please try again.",
                    status
                ))?;
            }
            Err(e) => {
                tracing::warn!("Credential check failed: {}", e);
                console.write_line(&format!(
                    "Unable to validate credentials: {}. Please try again.",
                    e
                ))?;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    MainMenu,
    Listing,
    Creating,
    Deleting,
    Exit,
}

/// A validated connection and the menus that drive it
pub struct Session<S> {
    service: S,
}

impl<S: KeyService> Session<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Run the main menu until the user exits
    pub async fn run<C: Console>(&self, console: &mut C) -> Result<()> {
        let mut screen = Screen::MainMenu;

        loop {
            screen = match screen {
                Screen::MainMenu => self.main_menu(console)?,
                Screen::Listing => {
                    self.show_keys(console).await?;
                    Screen::MainMenu
                }
                Screen::Creating => {
                    self.create(console).await?;
                    Screen::MainMenu
                }
                Screen::Deleting => {
                    self.delete_loop(console).await?;
                    Screen::MainMenu
                }
                Screen::Exit => return Ok(()),
            };
        }
    }

    fn main_menu<C: Console>(&self, console: &mut C) -> Result<Screen> {
        loop {
            console.write_line("")?;
            console.write_line("AWS Access Key Manager")?;
            console.write_line("1) List access keys")?;
            console.write_line("2) Create access key")?;
            console.write_line("3) Delete access key")?;
            console.write_line("4) Exit")?;

            let next = match console.read_key("Select an option (Esc to exit): ")? {
                Key::Char('1') => Screen::Listing,
                Key::Char('2') => Screen::Creating,
                Key::Char('3') => Screen::Deleting,
                Key::Char('4') | Key::Escape => Screen::Exit,
                _ => {
                    console.write_line(INVALID_SELECTION)?;
                    continue;
                }
            };
            return Ok(next);
        }
    }

    async fn show_keys<C: Console>(&self, console: &mut C) -> Result<()> {
        match self.service.list_access_keys().await {
            Ok(keys) => {
                for line in list_lines(&keys) {
                    console.write_line(&line)?;
                }
                if keys.is_empty() {
                    console.write_line(NO_KEYS)?;
                }
            }
            Err(e) => console.write_line(&format!("Error: {}", e))?,
        }
        Ok(())
    }

    async fn create<C: Console>(&self, console: &mut C) -> Result<()> {
        match self.service.create_access_key().await {
            Ok(key) => {
                for line in key.created_lines() {
                    console.write_line(&line)?;
                }
            }
            Err(e) => console.write_line(&format!("Error: {}", e))?,
        }
        Ok(())
    }

    /// Numbered list, pick one, confirm, repeat. Escape goes back to the menu.
    async fn delete_loop<C: Console>(&self, console: &mut C) -> Result<()> {
        loop {
            let keys = match self.service.list_access_keys().await {
                Ok(keys) => keys,
                Err(e) => {
                    console.write_line(&format!("Error: {}", e))?;
                    return Ok(());
                }
            };

            console.write_line("Access keys:")?;
            for (i, key) in keys.iter().enumerate() {
                console.write_line(&format!("{}) {}", i + 1, key.list_line()))?;
            }
            if keys.is_empty() {
                console.write_line(NO_KEYS)?;
            }

            let selected = match console.read_key("Select a key to delete (Esc to return): ")? {
                Key::Escape => return Ok(()),
                Key::Char(c) => c
                    .to_digit(10)
                    .map(|d| d as usize)
                    .filter(|&d| d >= 1 && d <= keys.len())
                    .map(|d| &keys[d - 1]),
                _ => None,
            };

            match selected {
                Some(key) => self.confirm_delete(console, key).await?,
                None => console.write_line(INVALID_SELECTION)?,
            }
        }
    }

    async fn confirm_delete<C: Console>(
        &self,
        console: &mut C,
        key: &AccessKeyMetadata,
    ) -> Result<()> {
        let prompt = format!("Delete access key {}? (y/n): ", key.id);

        loop {
            match console.read_key(&prompt)? {
                Key::Char('y') | Key::Char('Y') => {
                    match self.service.delete_access_key(&key.id).await {
                        Ok(()) => {
                            for line in deleted_lines(&key.id) {
                                console.write_line(&line)?;
                            }
                        }
                        Err(e) => console.write_line(&format!("Error: {}", e))?,
                    }
                    return Ok(());
                }
                Key::Char('n') | Key::Char('N') | Key::Escape => {
                    console.write_line("Deletion cancelled.")?;
                    return Ok(());
                }
                _ => console.write_line(INVALID_SELECTION)?,
            }
        }
    }
}
