// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "ArchonPro API", description = "CRM/ERP: empresas, vendas, faturamento e operação"),
    paths(
        // --- Companies ---
        handlers::companies::list_companies,
        handlers::companies::get_company,
        handlers::companies::create_company,
        handlers::companies::update_company,
        handlers::companies::delete_company,

        // --- Contacts ---
        handlers::contacts::list_contacts,
        handlers::contacts::get_contact,
        handlers::contacts::create_contact,
        handlers::contacts::update_contact,
        handlers::contacts::delete_contact,

        // --- Deals ---
        handlers::deals::list_deals,
        handlers::deals::get_deal,
        handlers::deals::create_deal,
        handlers::deals::update_deal,
        handlers::deals::delete_deal,

        // --- Quotes ---
        handlers::quotes::list_quotes,
        handlers::quotes::get_quote,
        handlers::quotes::create_quote,
        handlers::quotes::update_quote,
        handlers::quotes::delete_quote,
        handlers::quotes::put_quote_analysis,
        handlers::quotes::delete_quote_analysis,

        // --- Invoices ---
        handlers::invoices::list_invoices,
        handlers::invoices::get_invoice,
        handlers::invoices::create_invoice,
        handlers::invoices::update_invoice,
        handlers::invoices::delete_invoice,
        handlers::invoices::record_payment,
        handlers::invoices::send_reminder,

        // --- Finance ---
        handlers::ledger::list_income,
        handlers::ledger::get_income,
        handlers::ledger::create_income,
        handlers::ledger::update_income,
        handlers::ledger::delete_income,
        handlers::ledger::list_expenses,
        handlers::ledger::get_expense,
        handlers::ledger::create_expense,
        handlers::ledger::update_expense,
        handlers::ledger::delete_expense,

        // --- Projects / Timesheets ---
        handlers::projects::list_projects,
        handlers::projects::get_project,
        handlers::projects::create_project,
        handlers::projects::update_project,
        handlers::projects::delete_project,
        handlers::timesheets::list_timesheets,
        handlers::timesheets::get_timesheet,
        handlers::timesheets::create_timesheet,
        handlers::timesheets::update_timesheet,
        handlers::timesheets::delete_timesheet,

        // --- Appointments ---
        handlers::appointments::list_appointments,
        handlers::appointments::get_appointment,
        handlers::appointments::create_appointment,
        handlers::appointments::update_appointment,
        handlers::appointments::delete_appointment,

        // --- Articles ---
        handlers::articles::list_articles,
        handlers::articles::get_article,
        handlers::articles::create_article,
        handlers::articles::update_article,
        handlers::articles::delete_article,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_revenue_chart,
    ),
    components(
        schemas(
            // --- CRM ---
            models::company::Company,
            models::company::CreateCompanyPayload,
            models::company::UpdateCompanyPayload,
            models::contact::Contact,
            models::contact::CreateContactPayload,
            models::contact::UpdateContactPayload,
            models::deal::DealStage,
            models::deal::Deal,
            models::deal::CreateDealPayload,
            models::deal::UpdateDealPayload,

            // --- Vendas ---
            models::quote::QuoteStatus,
            models::quote::QuoteAnalysis,
            models::quote::Quote,
            models::quote::CreateQuotePayload,
            models::quote::UpdateQuotePayload,
            models::invoice::InvoiceStatus,
            models::invoice::InvoiceItem,
            models::invoice::TimelineEventKind,
            models::invoice::TimelineEvent,
            models::invoice::Invoice,
            models::invoice::CreateInvoicePayload,
            models::invoice::UpdateInvoicePayload,
            models::invoice::RecordPaymentPayload,

            // --- Financeiro ---
            models::ledger::LedgerEntry,
            models::ledger::CreateLedgerPayload,
            models::ledger::UpdateLedgerPayload,

            // --- Operação ---
            models::project::ProjectStatus,
            models::project::Project,
            models::project::CreateProjectPayload,
            models::project::UpdateProjectPayload,
            models::timesheet::Timesheet,
            models::timesheet::CreateTimesheetPayload,
            models::timesheet::UpdateTimesheetPayload,
            models::appointment::Appointment,
            models::appointment::CreateAppointmentPayload,
            models::appointment::UpdateAppointmentPayload,
            models::article::Article,
            models::article::CreateArticlePayload,
            models::article::UpdateArticlePayload,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::RevenueChartEntry,
        )
    ),
    tags(
        (name = "Companies", description = "Empresas (resolvidas por nome nos demais cadastros)"),
        (name = "Contacts", description = "Pessoas de contato"),
        (name = "Deals", description = "Funil de vendas"),
        (name = "Quotes", description = "Orçamentos e análise anexada"),
        (name = "Invoices", description = "Faturas, pagamentos e lembretes"),
        (name = "Finance", description = "Receitas e despesas avulsas"),
        (name = "Projects", description = "Projetos"),
        (name = "Timesheets", description = "Apontamento de horas"),
        (name = "Appointments", description = "Agenda"),
        (name = "Articles", description = "Catálogo de artigos"),
        (name = "Dashboard", description = "Indicadores e Gráficos Gerenciais")
    )
)]
pub struct ApiDoc;
