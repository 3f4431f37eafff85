// src/services/invoice_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        invoice_repo::{InvoiceChanges, NewInvoice},
        InvoiceRepository,
    },
    models::{
        company::CompanyRef,
        invoice::{
            invoice_number_prefix, next_invoice_number, CreateInvoicePayload, Invoice,
            InvoiceStatus, InvoiceTotals, RecordPaymentPayload, TimelineEvent, TimelineEventKind,
            UpdateInvoicePayload,
        },
    },
    services::CompanyService,
};

#[derive(Clone)]
pub struct InvoiceService {
    repo: InvoiceRepository,
    company_service: CompanyService,
}

impl InvoiceService {
    pub fn new(company_service: CompanyService) -> Self {
        Self {
            repo: InvoiceRepository::new(),
            company_service,
        }
    }

    pub async fn create(&self, pool: &PgPool, payload: &CreateInvoicePayload) -> Result<Invoice, AppError> {
        let today = Utc::now().date_naive();
        let issue_date = payload.issue_date.unwrap_or(today);

        let mut tx = pool.begin().await?;

        let company_id = self
            .company_service
            .resolve(
                &mut *tx,
                CompanyRef::parse(payload.company.as_deref(), payload.company_id),
            )
            .await?;

        // Número explícito tem prioridade; senão continua a sequência do ano da emissão
        let invoice_number = match payload.invoice_number.as_deref().map(str::trim) {
            Some(number) if !number.is_empty() => number.to_string(),
            _ => {
                let prefix = invoice_number_prefix(issue_date);
                self.repo.lock_number_sequence(&mut *tx, &prefix).await?;
                let last = self.repo.last_number_with_prefix(&mut *tx, &prefix).await?;
                next_invoice_number(issue_date, last.as_deref())
            }
        };

        let invoice = self
            .repo
            .create(
                &mut *tx,
                NewInvoice {
                    invoice_number: &invoice_number,
                    client: payload.client.trim(),
                    company_id,
                    items: &payload.items,
                    totals: InvoiceTotals::from_items(&payload.items),
                    status: payload.status.unwrap_or(InvoiceStatus::Draft),
                    issue_date,
                    due_date: payload.due_date,
                    notes: payload.notes.as_deref(),
                    created_event: TimelineEvent::now(TimelineEventKind::Created, None),
                },
            )
            .await?;

        tx.commit().await?;

        tracing::info!("🧾 Fatura {} criada (total {}).", invoice.invoice_number, invoice.total);
        Ok(invoice)
    }

    pub async fn update(
        &self,
        pool: &PgPool,
        id: Uuid,
        payload: &UpdateInvoicePayload,
    ) -> Result<Invoice, AppError> {
        let mut tx = pool.begin().await?;

        let current = self
            .repo
            .find_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Fatura"))?;

        ensure_status_change(current.status, payload.status)?;

        let company_change = self
            .company_service
            .resolve_change(&mut *tx, payload.company.as_deref(), payload.company_id)
            .await?;

        let changes = InvoiceChanges {
            client: payload.client.as_deref().map(str::trim),
            company_change,
            items: payload.items.as_deref(),
            totals: payload.items.as_deref().map(InvoiceTotals::from_items),
            status: payload.status,
            issue_date: payload.issue_date,
            due_date: payload.due_date,
            payment_method: payload.payment_method.as_deref(),
            notes: payload.notes.as_deref(),
            events: status_change_event(current.status, payload.status).into_iter().collect(),
            ..Default::default()
        };

        let invoice = self
            .repo
            .update(&mut *tx, id, changes)
            .await?
            .ok_or(AppError::NotFound("Fatura"))?;

        tx.commit().await?;
        Ok(invoice)
    }

    pub async fn record_payment(
        &self,
        pool: &PgPool,
        id: Uuid,
        payload: &RecordPaymentPayload,
    ) -> Result<Invoice, AppError> {
        let mut tx = pool.begin().await?;

        let current = self
            .repo
            .find_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Fatura"))?;

        ensure_payable(current.status)?;

        let payment_date = payload.payment_date.unwrap_or_else(|| Utc::now().date_naive());

        let changes = InvoiceChanges {
            status: Some(InvoiceStatus::Paid),
            payment_date: Some(payment_date),
            payment_method: payload.payment_method.as_deref(),
            events: vec![TimelineEvent::now(TimelineEventKind::Paid, payload.note.clone())],
            ..Default::default()
        };

        let invoice = self
            .repo
            .update(&mut *tx, id, changes)
            .await?
            .ok_or(AppError::NotFound("Fatura"))?;

        tx.commit().await?;

        tracing::info!("💶 Fatura {} paga em {}.", invoice.invoice_number, payment_date);
        Ok(invoice)
    }

    pub async fn send_reminder(&self, pool: &PgPool, id: Uuid) -> Result<Invoice, AppError> {
        let mut tx = pool.begin().await?;

        let current = self
            .repo
            .find_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Fatura"))?;

        ensure_remindable(current.status)?;

        let reminder_number = current.reminder_count + 1;
        let changes = InvoiceChanges {
            status: Some(InvoiceStatus::Overdue),
            reminder_increment: 1,
            events: vec![TimelineEvent::now(
                TimelineEventKind::ReminderSent,
                Some(format!("Lembrete nº {}", reminder_number)),
            )],
            ..Default::default()
        };

        let invoice = self
            .repo
            .update(&mut *tx, id, changes)
            .await?
            .ok_or(AppError::NotFound("Fatura"))?;

        tx.commit().await?;

        tracing::info!("📨 Lembrete nº {} da fatura {}.", reminder_number, invoice.invoice_number);
        Ok(invoice)
    }

    pub async fn delete(&self, pool: &PgPool, id: Uuid) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        let current = self
            .repo
            .find_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Fatura"))?;

        if !current.status.is_deletable() {
            tracing::warn!(
                "Tentativa de apagar a fatura {} com status {:?}.",
                current.invoice_number,
                current.status
            );
            return Err(AppError::Conflict(
                "Só faturas em rascunho podem ser apagadas.".to_string(),
            ));
        }

        self.repo.delete(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(())
    }
}

// --- Regras de status ---

fn status_change_event(
    current: InvoiceStatus,
    requested: Option<InvoiceStatus>,
) -> Option<TimelineEvent> {
    match requested {
        Some(next) if next != current => Some(TimelineEvent::now(
            TimelineEventKind::StatusChanged,
            Some(format!("{:?} → {:?}", current, next)),
        )),
        _ => None,
    }
}

// Fatura emitida não volta a rascunho (e rascunho é o único status apagável).
fn ensure_status_change(current: InvoiceStatus, requested: Option<InvoiceStatus>) -> Result<(), AppError> {
    match requested {
        Some(InvoiceStatus::Draft) if current != InvoiceStatus::Draft => Err(AppError::Conflict(
            "Uma fatura já emitida não pode voltar a rascunho.".to_string(),
        )),
        _ => Ok(()),
    }
}

fn ensure_payable(status: InvoiceStatus) -> Result<(), AppError> {
    match status {
        InvoiceStatus::Paid => Err(AppError::Conflict("A fatura já está paga.".to_string())),
        InvoiceStatus::Cancelled | InvoiceStatus::Credited => Err(AppError::Conflict(
            "Faturas canceladas ou estornadas não recebem pagamento.".to_string(),
        )),
        _ => Ok(()),
    }
}

fn ensure_remindable(status: InvoiceStatus) -> Result<(), AppError> {
    if status.is_outstanding() {
        Ok(())
    } else {
        Err(AppError::Conflict(
            "Só faturas enviadas, abertas ou vencidas recebem lembrete.".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::collections::HashSet;

    fn service() -> InvoiceService {
        InvoiceService::new(CompanyService::new())
    }

    fn create_payload(value: serde_json::Value) -> CreateInvoicePayload {
        serde_json::from_value(value).unwrap()
    }

    fn draft_payload() -> CreateInvoicePayload {
        create_payload(json!({
            "client": "Acme GmbH",
            "company": "Acme GmbH",
            "issueDate": "2026-03-01",
            "items": [{ "description": "Instalação", "quantity": 2, "price": 150, "vatRate": 19 }]
        }))
    }

    async fn set_status(pool: &PgPool, id: Uuid, status: InvoiceStatus) -> Invoice {
        let payload = UpdateInvoicePayload {
            status: Some(status),
            ..Default::default()
        };
        service().update(pool, id, &payload).await.unwrap()
    }

    #[test]
    fn issued_invoices_cannot_go_back_to_draft() {
        assert!(ensure_status_change(InvoiceStatus::Draft, Some(InvoiceStatus::Draft)).is_ok());
        assert!(ensure_status_change(InvoiceStatus::Sent, None).is_ok());
        assert!(ensure_status_change(InvoiceStatus::Sent, Some(InvoiceStatus::Paid)).is_ok());
        assert!(matches!(
            ensure_status_change(InvoiceStatus::Sent, Some(InvoiceStatus::Draft)),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            ensure_status_change(InvoiceStatus::Paid, Some(InvoiceStatus::Draft)),
            Err(AppError::Conflict(_))
        ));
    }

    /// Totais calculados no servidor, empresa criada pelo nome e evento `created`.
    #[sqlx::test]
    async fn create_computes_totals_and_numbers_the_invoice(pool: sqlx::PgPool) {
        let invoice = service().create(&pool, &draft_payload()).await.unwrap();

        assert_eq!(invoice.invoice_number, "INV-2026-0001");
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert_eq!(invoice.amount, Decimal::new(30000, 2));
        assert_eq!(invoice.vat_amount, Decimal::new(5700, 2));
        assert_eq!(invoice.total, Decimal::new(35700, 2));
        assert!(invoice.company_id.is_some());
        assert_eq!(invoice.timeline.len(), 1);
        assert_eq!(invoice.timeline[0].kind, TimelineEventKind::Created);
    }

    /// Um número digitado à mão fora do padrão não entra na sequência.
    #[sqlx::test]
    async fn explicit_non_numeric_number_keeps_the_sequence(pool: sqlx::PgPool) {
        let explicit = create_payload(json!({
            "invoiceNumber": "INV-2026-TEST",
            "client": "Acme GmbH",
            "issueDate": "2026-03-01"
        }));
        let manual = service().create(&pool, &explicit).await.unwrap();
        assert_eq!(manual.invoice_number, "INV-2026-TEST");

        let first = service().create(&pool, &draft_payload()).await.unwrap();
        let second = service().create(&pool, &draft_payload()).await.unwrap();

        assert_eq!(first.invoice_number, "INV-2026-0001");
        assert_eq!(second.invoice_number, "INV-2026-0002");
    }

    /// A sequência é numérica: 10000 vem depois de 9999.
    #[sqlx::test]
    async fn sequence_continues_past_four_digits(pool: sqlx::PgPool) {
        let explicit = create_payload(json!({
            "invoiceNumber": "INV-2026-9999",
            "client": "Acme GmbH",
            "issueDate": "2026-03-01"
        }));
        service().create(&pool, &explicit).await.unwrap();

        let after = service().create(&pool, &draft_payload()).await.unwrap();
        assert_eq!(after.invoice_number, "INV-2026-10000");

        let next = service().create(&pool, &draft_payload()).await.unwrap();
        assert_eq!(next.invoice_number, "INV-2026-10001");
    }

    /// Criações simultâneas no mesmo ano recebem números distintos, sem 409.
    #[sqlx::test]
    async fn concurrent_creates_get_distinct_numbers(pool: sqlx::PgPool) {
        let mut handles = Vec::new();
        for _ in 0..6 {
            let service = service();
            let pool = pool.clone();
            let payload = create_payload(json!({ "client": "Walk-in", "issueDate": "2026-03-01" }));
            handles.push(tokio::spawn(async move { service.create(&pool, &payload).await }));
        }

        let mut numbers = HashSet::new();
        for handle in handles {
            let invoice = handle.await.unwrap().unwrap();
            numbers.insert(invoice.invoice_number);
        }

        let expected: HashSet<String> = (1..=6).map(|n| format!("INV-2026-{:04}", n)).collect();
        assert_eq!(numbers, expected);
    }

    /// PATCH mantém o que não veio, recalcula totais e acrescenta ao histórico.
    #[sqlx::test]
    async fn update_keeps_absent_fields_and_appends_to_timeline(pool: sqlx::PgPool) {
        let created = service().create(&pool, &draft_payload()).await.unwrap();

        let payload: UpdateInvoicePayload = serde_json::from_value(json!({
            "items": [{ "description": "Manutenção", "quantity": 1, "price": 100, "vatRate": 7 }],
            "status": "Sent",
            "notes": "Enviada por e-mail"
        }))
        .unwrap();
        let updated = service().update(&pool, created.id, &payload).await.unwrap();

        assert_eq!(updated.client, "Acme GmbH");
        assert_eq!(updated.company_id, created.company_id);
        assert_eq!(updated.issue_date, created.issue_date);
        assert_eq!(updated.invoice_number, created.invoice_number);
        assert_eq!(updated.total, Decimal::new(10700, 2));
        assert_eq!(updated.status, InvoiceStatus::Sent);
        assert_eq!(updated.notes.as_deref(), Some("Enviada por e-mail"));

        let kinds: Vec<_> = updated.timeline.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![TimelineEventKind::Created, TimelineEventKind::StatusChanged]);
        assert_eq!(updated.timeline[0], created.timeline[0]);
    }

    /// Sent → Draft é recusado, então a fatura emitida continua protegida contra DELETE.
    #[sqlx::test]
    async fn issued_invoice_cannot_be_reverted_and_deleted(pool: sqlx::PgPool) {
        let created = service().create(&pool, &draft_payload()).await.unwrap();
        set_status(&pool, created.id, InvoiceStatus::Sent).await;

        let back_to_draft = UpdateInvoicePayload {
            status: Some(InvoiceStatus::Draft),
            ..Default::default()
        };
        let result = service().update(&pool, created.id, &back_to_draft).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let result = service().delete(&pool, created.id).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let still_there = InvoiceRepository::new().find_by_id(&pool, created.id).await.unwrap();
        assert_eq!(still_there.map(|i| i.status), Some(InvoiceStatus::Sent));
    }

    #[sqlx::test]
    async fn delete_removes_drafts(pool: sqlx::PgPool) {
        let created = service().create(&pool, &draft_payload()).await.unwrap();

        service().delete(&pool, created.id).await.unwrap();

        let gone = InvoiceRepository::new().find_by_id(&pool, created.id).await.unwrap();
        assert!(gone.is_none());
        assert!(matches!(
            service().delete(&pool, created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    /// Pagamento sem data usa hoje; um segundo pagamento é recusado.
    #[sqlx::test]
    async fn record_payment_marks_paid_once(pool: sqlx::PgPool) {
        let created = service().create(&pool, &draft_payload()).await.unwrap();
        set_status(&pool, created.id, InvoiceStatus::Sent).await;

        let payload = RecordPaymentPayload {
            payment_method: Some("Überweisung".to_string()),
            ..Default::default()
        };
        let paid = service().record_payment(&pool, created.id, &payload).await.unwrap();

        assert_eq!(paid.status, InvoiceStatus::Paid);
        assert_eq!(paid.payment_date, Some(Utc::now().date_naive()));
        assert_eq!(paid.payment_method.as_deref(), Some("Überweisung"));
        assert_eq!(paid.timeline.last().map(|e| e.kind), Some(TimelineEventKind::Paid));

        let again = service().record_payment(&pool, created.id, &payload).await;
        assert!(matches!(again, Err(AppError::Conflict(_))));
    }

    /// Cada lembrete soma um ao contador e marca a fatura como vencida.
    #[sqlx::test]
    async fn send_reminder_counts_and_marks_overdue(pool: sqlx::PgPool) {
        let created = service().create(&pool, &draft_payload()).await.unwrap();

        let refused = service().send_reminder(&pool, created.id).await;
        assert!(matches!(refused, Err(AppError::Conflict(_))));

        set_status(&pool, created.id, InvoiceStatus::Sent).await;
        let first = service().send_reminder(&pool, created.id).await.unwrap();
        assert_eq!(first.status, InvoiceStatus::Overdue);
        assert_eq!(first.reminder_count, 1);

        let second = service().send_reminder(&pool, created.id).await.unwrap();
        assert_eq!(second.reminder_count, 2);

        let reminders: Vec<_> = second
            .timeline
            .iter()
            .filter(|e| e.kind == TimelineEventKind::ReminderSent)
            .map(|e| e.note.clone())
            .collect();
        assert_eq!(
            reminders,
            vec![Some("Lembrete nº 1".to_string()), Some("Lembrete nº 2".to_string())]
        );
    }

    #[sqlx::test]
    async fn missing_invoice_is_not_found(pool: sqlx::PgPool) {
        let result = service().send_reminder(&pool, Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn status_event_only_when_status_really_changes() {
        assert!(status_change_event(InvoiceStatus::Draft, None).is_none());
        assert!(status_change_event(InvoiceStatus::Sent, Some(InvoiceStatus::Sent)).is_none());

        let event = status_change_event(InvoiceStatus::Draft, Some(InvoiceStatus::Sent)).unwrap();
        assert_eq!(event.kind, TimelineEventKind::StatusChanged);
        assert_eq!(event.note.as_deref(), Some("Draft → Sent"));
    }

    #[test]
    fn paid_cancelled_and_credited_cannot_be_paid_again() {
        assert!(ensure_payable(InvoiceStatus::Open).is_ok());
        assert!(ensure_payable(InvoiceStatus::Overdue).is_ok());
        assert!(matches!(ensure_payable(InvoiceStatus::Paid), Err(AppError::Conflict(_))));
        assert!(matches!(ensure_payable(InvoiceStatus::Cancelled), Err(AppError::Conflict(_))));
        assert!(matches!(ensure_payable(InvoiceStatus::Credited), Err(AppError::Conflict(_))));
    }

    #[test]
    fn reminders_only_for_outstanding_invoices() {
        assert!(ensure_remindable(InvoiceStatus::Sent).is_ok());
        assert!(ensure_remindable(InvoiceStatus::Overdue).is_ok());
        assert!(ensure_remindable(InvoiceStatus::Draft).is_err());
        assert!(ensure_remindable(InvoiceStatus::Paid).is_err());
    }
}
