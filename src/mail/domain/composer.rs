//! Template-driven composition of notification messages.

use super::{MailComposeError, MailMessage};
use crate::user::domain::EmailAddress;
use minijinja::{Environment, context};

const ASSIGNMENT_SUBJECT: &str = "assignment_subject";
const ASSIGNMENT_BODY: &str = "assignment_body";
const INVITE_SUBJECT: &str = "invite_subject";
const INVITE_BODY: &str = "invite_body";

const ASSIGNMENT_SUBJECT_SRC: &str = "Tâche {{ task }} assignée";
const ASSIGNMENT_BODY_SRC: &str = "La tâche {{ task }} du projet {{ project }} a été \
     assignée à {{ assignee }}.\nVous recevez cette notification car vous avez activé \
     les notifications par mail.";
const INVITE_SUBJECT_SRC: &str = "Invitation au projet {{ project }}";
const INVITE_BODY_SRC: &str = "{{ inviter }} vous invite à rejoindre le projet \
     {{ project }} en tant que {{ role }}.\nVous avez automatiquement été ajouté au projet.";

/// Interpolation inputs for an assignment-change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentNotice {
    project_name: String,
    task_name: String,
    assignee_name: String,
}

impl AssignmentNotice {
    /// Creates a notice from display names.
    #[must_use]
    pub fn new(
        project_name: impl Into<String>,
        task_name: impl Into<String>,
        assignee_name: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            task_name: task_name.into(),
            assignee_name: assignee_name.into(),
        }
    }

    /// Returns the new assignee's display name.
    #[must_use]
    pub fn assignee_name(&self) -> &str {
        &self.assignee_name
    }
}

/// Interpolation inputs for a project invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInvite {
    inviter_name: String,
    project_name: String,
    role_name: String,
}

impl ProjectInvite {
    /// Creates an invite from display names and the granted role label.
    #[must_use]
    pub fn new(
        inviter_name: impl Into<String>,
        project_name: impl Into<String>,
        role_name: impl Into<String>,
    ) -> Self {
        Self {
            inviter_name: inviter_name.into(),
            project_name: project_name.into(),
            role_name: role_name.into(),
        }
    }
}

/// Renders notification notices into addressed [`MailMessage`]s.
#[derive(Debug)]
pub struct MailComposer {
    environment: Environment<'static>,
}

impl MailComposer {
    /// Creates a composer with the built-in notification templates.
    ///
    /// # Errors
    ///
    /// Returns [`MailComposeError`] when a template fails to parse.
    pub fn new() -> Result<Self, MailComposeError> {
        let mut environment = Environment::new();
        environment.add_template(ASSIGNMENT_SUBJECT, ASSIGNMENT_SUBJECT_SRC)?;
        environment.add_template(ASSIGNMENT_BODY, ASSIGNMENT_BODY_SRC)?;
        environment.add_template(INVITE_SUBJECT, INVITE_SUBJECT_SRC)?;
        environment.add_template(INVITE_BODY, INVITE_BODY_SRC)?;
        Ok(Self { environment })
    }

    /// Renders an assignment notification for a single recipient.
    ///
    /// # Errors
    ///
    /// Returns [`MailComposeError`] when rendering fails.
    pub fn assignment_notification(
        &self,
        to: EmailAddress,
        notice: &AssignmentNotice,
    ) -> Result<MailMessage, MailComposeError> {
        let ctx = context! {
            task => notice.task_name.as_str(),
            project => notice.project_name.as_str(),
            assignee => notice.assignee_name.as_str(),
        };
        let subject = self.environment.get_template(ASSIGNMENT_SUBJECT)?.render(&ctx)?;
        let body = self.environment.get_template(ASSIGNMENT_BODY)?.render(&ctx)?;
        Ok(MailMessage::new(to, subject, body))
    }

    /// Renders one assignment notification per recipient.
    ///
    /// # Errors
    ///
    /// Returns [`MailComposeError`] when rendering fails.
    pub fn assignment_notifications(
        &self,
        recipients: Vec<EmailAddress>,
        notice: &AssignmentNotice,
    ) -> Result<Vec<MailMessage>, MailComposeError> {
        recipients
            .into_iter()
            .map(|to| self.assignment_notification(to, notice))
            .collect()
    }

    /// Renders a project invitation for the invited user.
    ///
    /// # Errors
    ///
    /// Returns [`MailComposeError`] when rendering fails.
    pub fn project_invite(
        &self,
        to: EmailAddress,
        invite: &ProjectInvite,
    ) -> Result<MailMessage, MailComposeError> {
        let ctx = context! {
            inviter => invite.inviter_name.as_str(),
            project => invite.project_name.as_str(),
            role => invite.role_name.as_str(),
        };
        let subject = self.environment.get_template(INVITE_SUBJECT)?.render(&ctx)?;
        let body = self.environment.get_template(INVITE_BODY)?.render(&ctx)?;
        Ok(MailMessage::new(to, subject, body))
    }
}
