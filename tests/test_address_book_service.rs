//! Service-level behaviour: caller validation in front of every engine.

use address_book_index::index::EngineKind;
use address_book_index::{
    AddressBookService, AddressBookServiceImpl, ContactUpdate, DirectoryError, NewContact,
};

mod fixtures;
use fixtures::*;

fn service(kind: EngineKind) -> AddressBookServiceImpl {
    AddressBookServiceImpl::new(engine(kind), 500)
}

#[test]
fn test_caller_errors_never_reach_the_engine() {
    for kind in EngineKind::ALL {
        let svc = service(kind);
        svc.insert_contacts(vec![john_smith()]).unwrap();

        assert!(matches!(
            svc.search(""),
            Err(DirectoryError::InvalidArgument(_))
        ));
        assert!(matches!(
            svc.search(&"x".repeat(501)),
            Err(DirectoryError::InvalidArgument(_))
        ));
        assert!(matches!(
            svc.delete_contacts(Vec::new()),
            Err(DirectoryError::InvalidArgument(_))
        ));

        // A rejected delete batch removes nothing, even its valid ids
        let id = svc.search("john").unwrap()[0].id.clone().into_inner();
        assert!(matches!(
            svc.delete_contacts(vec![id, String::new()]),
            Err(DirectoryError::Validation(_))
        ));
        assert_eq!(svc.search("john").unwrap().len(), 1, "{}", kind);

        assert_eq!(svc.metrics().rejected_requests_total(), 4, "{}", kind);
    }
}

#[test]
fn test_directory_walkthrough_through_service() {
    for kind in EngineKind::ALL {
        let svc = service(kind);
        assert_eq!(svc.engine(), kind);

        let created = svc.insert_contacts(sample_directory()).unwrap();
        assert_eq!(created.len(), 4);

        let jane = created[1].id.clone();
        let updated = svc
            .update_contacts(vec![ContactUpdate::new(jane.clone()).with_name("Jane Roe")])
            .unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(svc.search("Roe").unwrap().len(), 1, "{}", kind);

        let response = svc
            .delete_contacts(vec![jane.to_string(), "not-a-contact".to_string()])
            .unwrap();
        assert_eq!(response.deleted, 1);
        assert!(
            svc.search("Roe").unwrap().iter().all(|card| card.id != jane),
            "{}",
            kind
        );
    }
}

#[test]
fn test_whitespace_query_is_passed_through() {
    for kind in EngineKind::ALL {
        let svc = service(kind);
        svc.insert_contacts(vec![NewContact::new("Mary Ann", "", "")])
            .unwrap();

        // The space inside "Mary Ann" is a key in every engine
        assert_eq!(svc.search(" ").unwrap().len(), 1, "{}", kind);
    }
}
