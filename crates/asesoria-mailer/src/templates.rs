//! Transactional email templates
//!
//! Small HTML bodies rendered with `format!`. Layout intentionally plain;
//! these are notifications, not marketing mail.

use asesoria_core::entities::Cotizacion;

/// The transactional emails this system sends
#[derive(Debug, Clone)]
pub enum EmailTemplate<'a> {
    /// Account verification link after registration
    Verification {
        first_name: &'a str,
        token: &'a str,
    },
    /// Password reset link, valid for one hour
    PasswordReset {
        first_name: &'a str,
        token: &'a str,
    },
    /// Sent once the email address is verified
    Welcome { first_name: &'a str },
    /// Confirmation to the visitor who submitted a quote request
    CotizacionRecibida { cotizacion: &'a Cotizacion },
    /// Notification to the administrators about a new quote request
    CotizacionNueva { cotizacion: &'a Cotizacion },
}

fn wrap(title: &str, body: String) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background-color: #2c3e50; color: white; padding: 20px; text-align: center;">
    <h1>{title}</h1>
  </div>
  <div style="padding: 20px; background-color: #f8f9fa;">
    {body}
    <hr style="margin: 30px 0; border: none; border-top: 1px solid #ddd;">
    <p style="font-size: 12px; color: #666;">
      Este es un email automatico, por favor no respondas a este mensaje.
    </p>
  </div>
</div>"#
    )
}

fn cotizacion_detail(cotizacion: &Cotizacion) -> String {
    format!(
        r"<div style='background-color: white; padding: 15px; border-radius: 5px;'>
      <p><strong>Referencia:</strong> {}</p>
      <p><strong>Nombre:</strong> {} {}</p>
      <p><strong>Email:</strong> {}</p>
      <p><strong>Telefono:</strong> {}</p>
      <p><strong>Isapre actual:</strong> {}</p>
      <p><strong>Clinica de preferencia:</strong> {}</p>
      <p><strong>Numero de cargas:</strong> {}</p>
    </div>",
        cotizacion.cotizacion_ref,
        cotizacion.nombre,
        cotizacion.apellidos,
        cotizacion.email,
        cotizacion.telefono,
        cotizacion.isapre,
        cotizacion.clinica,
        cotizacion.numero_cargas,
    )
}

/// Render a template into `(subject, html body)`.
///
/// `frontend_url` is the base for verification/reset links.
pub fn render_email(template: &EmailTemplate<'_>, frontend_url: &str) -> (String, String) {
    match template {
        EmailTemplate::Verification { first_name, token } => {
            let url = format!("{frontend_url}/verify-email?token={token}");
            let subject = "Verifica tu cuenta - Asesoria Seguros".to_string();
            let body = format!(
                r#"<h2>Hola {first_name}!</h2>
    <p>Gracias por registrarte en nuestro sistema de asesoria de seguros de salud.</p>
    <p>Para completar tu registro, verifica tu direccion de email:</p>
    <div style="text-align: center; margin: 30px 0;">
      <a href="{url}" style="background-color: #3498db; color: white; padding: 12px 30px; text-decoration: none; border-radius: 5px; display: inline-block;">Verificar Email</a>
    </div>
    <p>O copia y pega este enlace en tu navegador:</p>
    <p style="word-break: break-all; color: #3498db;">{url}</p>
    <p>Si no solicitaste esta verificacion, puedes ignorar este email.</p>"#
            );
            (subject, wrap("Asesoria Seguros", body))
        }

        EmailTemplate::PasswordReset { first_name, token } => {
            let url = format!("{frontend_url}/reset-password?token={token}");
            let subject = "Restablecer Contrasena - Asesoria Seguros".to_string();
            let body = format!(
                r#"<h2>Hola {first_name}!</h2>
    <p>Has solicitado restablecer tu contrasena.</p>
    <div style="text-align: center; margin: 30px 0;">
      <a href="{url}" style="background-color: #e74c3c; color: white; padding: 12px 30px; text-decoration: none; border-radius: 5px; display: inline-block;">Restablecer Contrasena</a>
    </div>
    <p style="word-break: break-all; color: #e74c3c;">{url}</p>
    <p><strong>Importante:</strong> este enlace expira en 1 hora.</p>
    <p>Si no solicitaste este restablecimiento, tu contrasena permanecera sin cambios.</p>"#
            );
            (subject, wrap("Restablecer Contrasena", body))
        }

        EmailTemplate::Welcome { first_name } => {
            let subject = "Bienvenido a Asesoria Seguros!".to_string();
            let body = format!(
                r"<h2>Hola {first_name}!</h2>
    <p>Tu cuenta ha sido verificada exitosamente.</p>
    <p>Ya puedes acceder al sistema y gestionar cotizaciones, comentarios y usuarios.</p>"
            );
            (subject, wrap("Bienvenido!", body))
        }

        EmailTemplate::CotizacionRecibida { cotizacion } => {
            let subject = format!(
                "Tu solicitud de cotizacion ha sido recibida! [{}] - Asesoria Seguros",
                cotizacion.cotizacion_ref
            );
            let body = format!(
                r"<h2>Hola {}!</h2>
    <p>Recibimos tu solicitud de cotizacion. Te contactaremos pronto.</p>
    {}
    <p>Puedes consultar el estado de tu solicitud con la referencia indicada.</p>",
                cotizacion.nombre,
                cotizacion_detail(cotizacion),
            );
            (subject, wrap("Asesoria Seguros", body))
        }

        EmailTemplate::CotizacionNueva { cotizacion } => {
            let subject = format!(
                "Nueva cotizacion recibida [{}] - Sistema de Asesoria",
                cotizacion.cotizacion_ref
            );
            let body = format!(
                r"<h2>Nueva cotizacion</h2>
    <p>Se ha recibido una nueva solicitud a traves del formulario web:</p>
    {}
    <p>Accede al panel de administracion para revisarla.</p>",
                cotizacion_detail(cotizacion),
            );
            (subject, wrap("Nueva Cotizacion", body))
        }
    }
}
