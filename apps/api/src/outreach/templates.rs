// Static text for the outreach renderer.

/// Prefix for every derived LinkedIn company URL.
pub const LINKEDIN_COMPANY_BASE: &str = "https://www.linkedin.com/company/";

/// Cold-outreach email body. Replace `{addressee}` and `{company}` before sending.
/// `{company}` appears twice (opening and closing paragraphs).
pub const COLD_EMAIL_TEMPLATE: &str = "Dear {addressee},

I hope this email finds you well. I came across {company}'s innovative work and was immediately drawn to your company's mission.

With my experience in [relevant field] and a proven track record of [key achievement], I believe I could be a valuable addition to your team.

I would welcome the opportunity to discuss how my background aligns with your needs and learn more about current opportunities at {company}.

Thank you for considering my interest. I look forward to your response.

Best regards,
[Your name]";

/// Addressee used when no directory is available and the contact is synthesized.
pub const SYNTHETIC_ADDRESSEE_TEMPLATE: &str = "Hiring Manager at {company}";
