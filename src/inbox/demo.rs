use super::store::LocalStore;
use super::types::MessageDraft;

fn demo_drafts() -> Vec<MessageDraft> {
    vec![
        MessageDraft::new(
            "John Doe",
            "john.doe@example.com",
            "Hi Jose! I saw your portfolio and I'm really impressed with your work. Would love to discuss a potential project collaboration. Could we schedule a call this week?",
        ),
        MessageDraft::new(
            "Sarah Smith",
            "sarah.smith@techcorp.com",
            "Hello, we are looking for a Full Stack Developer for our startup. Your skills in React and NestJS are exactly what we need. Are you available for freelance work?",
        ),
        MessageDraft::new(
            "Miguel Rodriguez",
            "miguel.r@design.agency",
            "Hola Jose! Me encanta tu trabajo en los proyectos de Avila Grill y LisCake. Tenemos algunos clientes que necesitan sitios web similares. ¿Podrías ayudarnos?",
        ),
    ]
}

/// Add the sample messages if the store is empty. Returns how many were added.
pub fn seed_if_empty(store: &LocalStore) -> usize {
    if !store.get_all().is_empty() {
        return 0;
    }
    let added = demo_drafts()
        .iter()
        .filter_map(|d| store.add(d))
        .count();
    log::info!("Seeded {} demo messages into {}", added, store.path().display());
    added
}
