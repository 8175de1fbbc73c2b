//! Loan lifecycle: creation, replacement, partial update and deletion

use lending_server::{models::LoanRequest, AppError, EntityKind};

use crate::common::{add_book, add_member, date, loan_request, services};

#[tokio::test]
async fn test_create_attaches_full_entities() {
    let services = services();
    let book = add_book(&services, "X").await;
    let member = add_member(&services, "a@b.com").await;

    let loan = services
        .loans
        .create(loan_request(book.id, member.id, date(2023, 1, 1)))
        .await
        .unwrap();

    assert_eq!(loan.id, 1);
    assert_eq!(loan.book, book);
    assert_eq!(loan.member, member);
    assert_eq!(loan.loan_date, date(2023, 1, 1));
    assert_eq!(loan.return_date, None);
}

#[tokio::test]
async fn test_create_with_missing_book_writes_nothing() {
    let services = services();
    let member = add_member(&services, "a@b.com").await;

    let err = services
        .loans
        .create(loan_request(99, member.id, date(2023, 1, 1)))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound { kind: EntityKind::Book, id: 99 }));
    assert!(services.loans.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_with_missing_book_and_member_names_book() {
    let services = services();

    let err = services
        .loans
        .create(loan_request(7, 8, date(2023, 1, 1)))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound { kind: EntityKind::Book, id: 7 }));
}

#[tokio::test]
async fn test_create_with_missing_member_writes_nothing() {
    let services = services();
    let book = add_book(&services, "X").await;

    let err = services
        .loans
        .create(loan_request(book.id, 5, date(2023, 1, 1)))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound { kind: EntityKind::Member, id: 5 }));
    assert!(services.loans.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_requires_loan_date() {
    let services = services();
    let book = add_book(&services, "X").await;
    let member = add_member(&services, "a@b.com").await;

    let err = services
        .loans
        .create(LoanRequest {
            book_id: Some(book.id),
            member_id: Some(member.id),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_create_rejects_return_before_loan() {
    let services = services();
    let book = add_book(&services, "X").await;
    let member = add_member(&services, "a@b.com").await;

    let mut request = loan_request(book.id, member.id, date(2023, 1, 10));
    request.return_date = Some(date(2023, 1, 9));
    let err = services.loans.create(request).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_create_then_get_round_trips() {
    let services = services();
    let book = add_book(&services, "X").await;
    let member = add_member(&services, "a@b.com").await;

    let mut request = loan_request(book.id, member.id, date(2023, 1, 1));
    request.return_date = Some(date(2023, 1, 15));
    let created = services.loans.create(request).await.unwrap();
    let fetched = services.loans.get_by_id(created.id).await.unwrap();

    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_replace_missing_loan_wins_over_missing_refs() {
    let services = services();
    let book = add_book(&services, "X").await;
    let member = add_member(&services, "a@b.com").await;

    let with_valid_refs = services
        .loans
        .replace(42, loan_request(book.id, member.id, date(2023, 1, 1)))
        .await
        .unwrap_err();
    let with_invalid_refs = services
        .loans
        .replace(42, loan_request(99, 98, date(2023, 1, 1)))
        .await
        .unwrap_err();

    assert!(matches!(with_valid_refs, AppError::NotFound { kind: EntityKind::Loan, id: 42 }));
    assert!(matches!(with_invalid_refs, AppError::NotFound { kind: EntityKind::Loan, id: 42 }));
}

#[tokio::test]
async fn test_replace_swaps_book() {
    let services = services();
    let first = add_book(&services, "X").await;
    let second = add_book(&services, "Y").await;
    let member = add_member(&services, "a@b.com").await;
    let loan = services
        .loans
        .create(loan_request(first.id, member.id, date(2023, 1, 1)))
        .await
        .unwrap();

    let replaced = services
        .loans
        .replace(loan.id, loan_request(second.id, member.id, date(2023, 2, 1)))
        .await
        .unwrap();

    assert_eq!(replaced.id, loan.id);
    let reread = services.loans.get_by_id(loan.id).await.unwrap();
    assert_eq!(reread.book, second);
    assert_eq!(reread.loan_date, date(2023, 2, 1));
    assert_eq!(services.loans.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_replace_discards_stored_return_date() {
    let services = services();
    let book = add_book(&services, "X").await;
    let member = add_member(&services, "a@b.com").await;
    let mut request = loan_request(book.id, member.id, date(2023, 1, 1));
    request.return_date = Some(date(2023, 1, 20));
    let loan = services.loans.create(request).await.unwrap();

    let replaced = services
        .loans
        .replace(loan.id, loan_request(book.id, member.id, date(2023, 1, 1)))
        .await
        .unwrap();

    assert_eq!(replaced.return_date, None);
}

#[tokio::test]
async fn test_replace_with_missing_member_keeps_original() {
    let services = services();
    let book = add_book(&services, "X").await;
    let member = add_member(&services, "a@b.com").await;
    let loan = services
        .loans
        .create(loan_request(book.id, member.id, date(2023, 1, 1)))
        .await
        .unwrap();

    let err = services
        .loans
        .replace(loan.id, loan_request(book.id, 2, date(2023, 1, 1)))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound { kind: EntityKind::Member, id: 2 }));
    let reread = services.loans.get_by_id(loan.id).await.unwrap();
    assert_eq!(reread.member, member);
}

#[tokio::test]
async fn test_update_keeps_omitted_fields() {
    let services = services();
    let book = add_book(&services, "X").await;
    let member = add_member(&services, "a@b.com").await;
    let loan = services
        .loans
        .create(loan_request(book.id, member.id, date(2023, 1, 1)))
        .await
        .unwrap();

    let updated = services
        .loans
        .update(
            loan.id,
            LoanRequest {
                return_date: Some(date(2023, 1, 14)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.book, book);
    assert_eq!(updated.member, member);
    assert_eq!(updated.loan_date, date(2023, 1, 1));
    assert_eq!(updated.return_date, Some(date(2023, 1, 14)));
}

#[tokio::test]
async fn test_update_missing_loan() {
    let services = services();

    let err = services
        .loans
        .update(3, LoanRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound { kind: EntityKind::Loan, id: 3 }));
}

#[tokio::test]
async fn test_delete_twice_reports_not_found() {
    let services = services();
    let book = add_book(&services, "X").await;
    let member = add_member(&services, "a@b.com").await;
    let loan = services
        .loans
        .create(loan_request(book.id, member.id, date(2023, 1, 1)))
        .await
        .unwrap();

    services.loans.delete(loan.id).await.unwrap();
    let err = services.loans.delete(loan.id).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound { kind: EntityKind::Loan, id } if id == loan.id));
    // Parents are untouched
    assert_eq!(services.books.get_by_id(book.id).await.unwrap(), book);
    assert_eq!(services.members.get_by_id(member.id).await.unwrap(), member);
}

#[tokio::test]
async fn test_list_keeps_insertion_order() {
    let services = services();
    let book = add_book(&services, "X").await;
    let member = add_member(&services, "a@b.com").await;
    for day in [3, 1, 2] {
        services
            .loans
            .create(loan_request(book.id, member.id, date(2023, 1, day)))
            .await
            .unwrap();
    }

    let days: Vec<_> = services
        .loans
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|loan| loan.loan_date)
        .collect();

    assert_eq!(days, vec![date(2023, 1, 3), date(2023, 1, 1), date(2023, 1, 2)]);
}

#[tokio::test]
async fn test_scenario_walkthrough() {
    let services = services();
    let book = add_book(&services, "X").await;
    let member = add_member(&services, "a@b.com").await;
    assert_eq!((book.id, member.id), (1, 1));

    let loan = services
        .loans
        .create(loan_request(1, 1, date(2023, 1, 1)))
        .await
        .unwrap();
    assert_eq!(loan.id, 1);

    let err = services
        .loans
        .create(loan_request(99, 1, date(2023, 1, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { kind: EntityKind::Book, id: 99 }));

    let err = services
        .loans
        .replace(1, loan_request(1, 2, date(2023, 1, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { kind: EntityKind::Member, id: 2 }));
    assert_eq!(services.loans.get_by_id(1).await.unwrap().member.id, 1);

    services.loans.delete(1).await.unwrap();
    let err = services.loans.delete(1).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { kind: EntityKind::Loan, id: 1 }));
}

#[tokio::test]
async fn test_replace_missing_loan_wins_over_empty_request() {
    let services = services();

    let err = services
        .loans
        .replace(42, LoanRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound { kind: EntityKind::Loan, id: 42 }));
}

#[tokio::test]
async fn test_create_validation_wins_over_missing_book() {
    let services = services();

    let err = services
        .loans
        .create(LoanRequest {
            book_id: Some(99),
            member_id: Some(1),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(services.loans.list().await.unwrap().is_empty());
}
