use super::paths;

/// Every mutating call the client makes. Each one owns an in-flight flag and
/// knows which cached reads it makes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AddContact,
    UpdateContact,
    DeleteContact,
    SendBulkEmails,
    SaveProfile,
    DeleteProfile,
    SaveSettings,
}

impl Operation {
    pub fn flag(self) -> &'static str {
        match self {
            Operation::AddContact => "isAddingContact",
            Operation::UpdateContact => "isUpdatingContact",
            Operation::DeleteContact => "isDeletingContact",
            Operation::SendBulkEmails => "isSendingBulkEmails",
            Operation::SaveProfile => "isSavingProfile",
            Operation::DeleteProfile => "isDeletingProfile",
            Operation::SaveSettings => "isSavingSettings",
        }
    }

    pub fn busy_message(self) -> &'static str {
        match self {
            Operation::AddContact => "Already adding",
            Operation::UpdateContact => "Already updating",
            Operation::DeleteContact => "Already deleting",
            Operation::SendBulkEmails => "Already sending bulk emails",
            Operation::SaveProfile => "Already saving profile",
            Operation::DeleteProfile => "Already deleting profile",
            Operation::SaveSettings => "Already saving settings",
        }
    }

    /// Key prefixes to drop from the read cache once this operation succeeds.
    pub fn invalidates(self) -> &'static [&'static str] {
        match self {
            Operation::AddContact | Operation::UpdateContact | Operation::DeleteContact => {
                &[paths::CONTACTS, paths::ANALYTICS]
            }
            Operation::SendBulkEmails => &[paths::EMAILS, paths::ANALYTICS],
            Operation::SaveProfile | Operation::DeleteProfile => &[paths::PROFILE],
            Operation::SaveSettings => &[paths::SETTINGS],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_writes_invalidate_contact_list() {
        for op in [
            Operation::AddContact,
            Operation::UpdateContact,
            Operation::DeleteContact,
        ] {
            assert!(op.invalidates().contains(&paths::CONTACTS));
        }
    }

    #[test]
    fn test_bulk_send_invalidates_logs_and_stats() {
        let prefixes = Operation::SendBulkEmails.invalidates();
        assert!(paths::EMAIL_LOGS.starts_with(prefixes[0]));
        assert!(paths::EMAIL_STATS.starts_with(prefixes[0]));
    }
}
