//! Email bodies. Caller-supplied text is HTML-escaped before substitution.

use super::{EmailMessage, Recipient};

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn wrap(body: &str) -> String {
    format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: auto;\">{body}</div>"
    )
}

pub fn report_ready(to: Recipient, pdf_link: &str) -> EmailMessage {
    let link = escape(pdf_link);
    EmailMessage {
        to,
        subject: "Il tuo Report RGandja è pronto".into(),
        html: wrap(&format!(
            "<p>Ciao,</p><p>il tuo report è stato generato con successo.</p>\
             <p>Puoi scaricarlo qui: <a href=\"{link}\">{link}</a></p>\
             <p>Grazie per aver utilizzato RGandja Decision Systems.</p>"
        )),
    }
}

pub fn onboarding(to: Recipient, support: &str) -> EmailMessage {
    EmailMessage {
        to,
        subject: "Benvenuto in RGandja".into(),
        html: wrap(&format!(
            "<p>Ciao,</p><p>benvenuto nella piattaforma RGandja Decision Intelligence.</p>\
             <p>La tua registrazione è attiva e puoi iniziare subito a utilizzare il sistema.</p>\
             <p>Per assistenza: {}</p>",
            escape(support)
        )),
    }
}

pub fn license_expiry(to: Recipient, days_left: u32, support: &str) -> EmailMessage {
    EmailMessage {
        to,
        subject: "La tua licenza RGandja sta per scadere".into(),
        html: wrap(&format!(
            "<p>Ciao,</p><p>la tua licenza RGandja scadrà tra {days_left} giorni.</p>\
             <p>Per rinnovarla, accedi alla tua area personale o contatta {}.</p>",
            escape(support)
        )),
    }
}

pub fn plan_activated(to: Recipient, plan_name: &str, support: &str) -> EmailMessage {
    let name = escape(to.name.as_deref().unwrap_or("cliente"));
    let plan = escape(plan_name);
    EmailMessage {
        to,
        subject: "Protocollo RGD-Alpha: Accesso Autorizzato".into(),
        html: wrap(&format!(
            "<h2>Benvenuto nel Sistema, {name}</h2>\
             <p>L'attivazione del tuo <strong>{plan}</strong> è stata completata con successo.</p>\
             <p>Servizio: {plan}<br>Stato: Attivo</p>\
             <p>Se non hai richiesto tu questa attivazione, contatta {}.</p>",
            escape(support)
        )),
    }
}

pub fn promotion(to: Recipient) -> EmailMessage {
    let name = escape(to.name.as_deref().unwrap_or("cliente"));
    EmailMessage {
        to,
        subject: "La tua Promozione RGandja è qui!".into(),
        html: wrap(&format!(
            "<h2>Ciao {name},</h2>\
             <p>Grazie per esserti interessato alla nostra promozione esclusiva.</p>\
             <p>Tramite questo messaggio puoi accedere ai dettagli del protocollo richiesto.</p>"
        )),
    }
}
