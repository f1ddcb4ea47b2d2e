//! Settings screens: appearance, catalogues, security.
//!
//! Validation failures come back as warnings; storage failures propagate.

use std::path::Path;

use super::Notice;
use crate::error::{AppError, AppResult};
use crate::settings::catalogue::{
    add_priority, add_ticket_type, delete_priority, delete_ticket_type, update_priority,
    update_ticket_type, PriorityDraft, TicketTypeDraft,
};
use crate::settings::logo::load_logo_file;
use crate::settings::{Appearance, SecuritySettings, SettingsRepository};

/// Turns a validation error into a warning notice, passes anything else up.
fn warn_on_invalid(result: AppResult<Notice>) -> AppResult<Notice> {
    match result {
        Err(AppError::Validation(message)) => Ok(Notice::warning(message)),
        other => other,
    }
}

// ─── Appearance ──────────────────────────────────────────────────────────────

pub fn save_appearance<R: SettingsRepository>(
    repo: &R,
    appearance: &Appearance,
) -> AppResult<Notice> {
    repo.save_appearance(appearance)?;
    Ok(Notice::success("Paramètres d'apparence enregistrés avec succès !"))
}

/// Loads an image from disk into the stored appearance.
pub fn upload_logo<R: SettingsRepository>(repo: &R, path: &Path) -> AppResult<Notice> {
    warn_on_invalid((|| -> AppResult<Notice> {
        let logo = load_logo_file(path)?;
        let mut appearance = repo.load_appearance()?;
        appearance.app_logo = Some(logo);
        save_appearance(repo, &appearance)
    })())
}

pub fn delete_logo<R: SettingsRepository>(repo: &R) -> AppResult<Notice> {
    let mut appearance = repo.load_appearance()?;
    appearance.app_logo = None;
    save_appearance(repo, &appearance)
}

// ─── Ticket types ────────────────────────────────────────────────────────────

pub fn create_ticket_type<R: SettingsRepository>(
    repo: &R,
    draft: TicketTypeDraft,
) -> AppResult<Notice> {
    warn_on_invalid((|| -> AppResult<Notice> {
        let mut types = repo.load_ticket_types()?;
        add_ticket_type(&mut types, draft)?;
        repo.save_ticket_types(&types)?;
        Ok(Notice::success("Type de ticket ajouté avec succès !"))
    })())
}

pub fn edit_ticket_type<R: SettingsRepository>(
    repo: &R,
    id: u32,
    draft: TicketTypeDraft,
) -> AppResult<Notice> {
    warn_on_invalid((|| -> AppResult<Notice> {
        let mut types = repo.load_ticket_types()?;
        update_ticket_type(&mut types, id, draft)?;
        repo.save_ticket_types(&types)?;
        Ok(Notice::success("Type de ticket modifié avec succès !"))
    })())
}

/// `None` when the user did not confirm.
pub fn remove_ticket_type<R, C>(repo: &R, id: u32, confirm: C) -> AppResult<Option<Notice>>
where
    R: SettingsRepository,
    C: FnOnce(&str) -> bool,
{
    if !confirm("Êtes-vous sûr de vouloir supprimer ce type de ticket ?") {
        return Ok(None);
    }
    let mut types = repo.load_ticket_types()?;
    if delete_ticket_type(&mut types, id) {
        repo.save_ticket_types(&types)?;
    }
    Ok(Some(Notice::success("Type de ticket supprimé avec succès !")))
}

// ─── Priorities ──────────────────────────────────────────────────────────────

pub fn create_priority<R: SettingsRepository>(repo: &R, draft: PriorityDraft) -> AppResult<Notice> {
    warn_on_invalid((|| -> AppResult<Notice> {
        let mut priorities = repo.load_priorities()?;
        add_priority(&mut priorities, draft)?;
        repo.save_priorities(&priorities)?;
        Ok(Notice::success("Priorité ajoutée avec succès !"))
    })())
}

pub fn edit_priority<R: SettingsRepository>(
    repo: &R,
    id: u32,
    draft: PriorityDraft,
) -> AppResult<Notice> {
    warn_on_invalid((|| -> AppResult<Notice> {
        let mut priorities = repo.load_priorities()?;
        update_priority(&mut priorities, id, draft)?;
        repo.save_priorities(&priorities)?;
        Ok(Notice::success("Priorité modifiée avec succès !"))
    })())
}

pub fn remove_priority<R, C>(repo: &R, id: u32, confirm: C) -> AppResult<Option<Notice>>
where
    R: SettingsRepository,
    C: FnOnce(&str) -> bool,
{
    if !confirm("Êtes-vous sûr de vouloir supprimer cette priorité ?") {
        return Ok(None);
    }
    let mut priorities = repo.load_priorities()?;
    if delete_priority(&mut priorities, id) {
        repo.save_priorities(&priorities)?;
    }
    Ok(Some(Notice::success("Priorité supprimée avec succès !")))
}

// ─── Security ────────────────────────────────────────────────────────────────

pub fn save_security<R: SettingsRepository>(
    repo: &R,
    settings: &SecuritySettings,
) -> AppResult<Notice> {
    repo.save_security(settings)?;
    Ok(Notice::success("Paramètres de sécurité enregistrés avec succès !"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::NoticeLevel;
    use crate::db::setup::init_in_memory;
    use crate::settings::SqliteSettings;

    fn draft(label: &str) -> TicketTypeDraft {
        TicketTypeDraft {
            label: label.into(),
            description: "Téléphones et standards".into(),
            color: "#17a2b8".into(),
        }
    }

    #[test]
    fn test_create_ticket_type_persists() {
        let conn = init_in_memory().unwrap();
        let repo = SqliteSettings::new(&conn);
        let notice = create_ticket_type(&repo, draft("Téléphonie")).unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        let types = repo.load_ticket_types().unwrap();
        assert_eq!(types.len(), 6);
        assert_eq!(types[5].id, 6);
    }

    #[test]
    fn test_invalid_draft_is_a_warning() {
        let conn = init_in_memory().unwrap();
        let repo = SqliteSettings::new(&conn);
        let notice = create_ticket_type(&repo, draft("")).unwrap();
        assert_eq!(notice, Notice::warning("Veuillez remplir tous les champs"));
        // nothing stored
        assert!(repo.get_raw("ticketTypes").unwrap().is_none());
    }

    #[test]
    fn test_remove_requires_confirmation() {
        let conn = init_in_memory().unwrap();
        let repo = SqliteSettings::new(&conn);
        assert!(remove_priority(&repo, 1, |_| false).unwrap().is_none());
        assert_eq!(repo.load_priorities().unwrap().len(), 4);

        let notice = remove_priority(&repo, 1, |_| true).unwrap().unwrap();
        assert_eq!(notice.message, "Priorité supprimée avec succès !");
        assert_eq!(repo.load_priorities().unwrap()[0].label, "Haute");
    }

    #[test]
    fn test_upload_rejects_unsupported_logo() {
        let conn = init_in_memory().unwrap();
        let repo = SqliteSettings::new(&conn);
        let path = std::env::temp_dir().join(format!("dsi_logo_{}.gif", std::process::id()));
        std::fs::write(&path, b"GIF89a").unwrap();

        let notice = upload_logo(&repo, &path).unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "Format non accepté. Utilisez PNG ou JPG");
        assert!(repo.load_appearance().unwrap().app_logo.is_none());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_upload_and_delete_logo() {
        let conn = init_in_memory().unwrap();
        let repo = SqliteSettings::new(&conn);
        let path = std::env::temp_dir().join(format!("dsi_logo_{}.png", std::process::id()));
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        upload_logo(&repo, &path).unwrap();
        let logo = repo.load_appearance().unwrap().app_logo.unwrap();
        assert!(logo.starts_with("data:image/png;base64,"));

        delete_logo(&repo).unwrap();
        assert!(repo.load_appearance().unwrap().app_logo.is_none());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_edit_and_remove_ticket_type() {
        let conn = init_in_memory().unwrap();
        let repo = SqliteSettings::new(&conn);
        edit_ticket_type(&repo, 2, draft("Réseau & VPN")).unwrap();
        assert_eq!(repo.load_ticket_types().unwrap()[1].label, "Réseau & VPN");

        let missing = edit_ticket_type(&repo, 99, draft("Inconnu")).unwrap();
        assert_eq!(missing.level, NoticeLevel::Warning);

        remove_ticket_type(&repo, 2, |_| true).unwrap();
        let types = repo.load_ticket_types().unwrap();
        assert_eq!(types.len(), 4);
        assert!(types.iter().all(|t| t.id != 2));
    }

    #[test]
    fn test_priority_max_time_is_composed() {
        let conn = init_in_memory().unwrap();
        let repo = SqliteSettings::new(&conn);
        let urgent = PriorityDraft {
            label: "Urgente".into(),
            level: 0,
            color: "#dc3545".into(),
            max_time_value: 30,
            max_time_unit: "minutes".into(),
        };
        create_priority(&repo, urgent.clone()).unwrap();
        let created = repo.load_priorities().unwrap().pop().unwrap();
        assert_eq!(created.id, 5);
        assert_eq!(created.max_time, "30 minutes");

        let notice = edit_priority(
            &repo,
            5,
            PriorityDraft {
                max_time_value: 1,
                max_time_unit: "heures".into(),
                ..urgent
            },
        )
        .unwrap();
        assert_eq!(notice.message, "Priorité modifiée avec succès !");
        assert_eq!(repo.load_priorities().unwrap()[4].max_time, "1 heures");
    }
}
