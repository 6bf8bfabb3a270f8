//! UPI payment QR rendering.
//!
//! Encodes a `upi://pay` URI carrying the merchant payment identifier and
//! the amount into a QR code, returned as a base64 PNG for the payment
//! response panel.

use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Luma};
use musebook_core::environment::PaymentCodeRenderer;
use musebook_core::error::PaymentCodeError;
use musebook_core::pricing::Rupees;
use qrcode::QrCode;

/// Renders UPI payment QR codes for a fixed merchant.
#[derive(Clone, Debug)]
pub struct UpiPaymentCodeRenderer {
    upi_id: String,
    payee_name: String,
}

impl UpiPaymentCodeRenderer {
    /// Creates a renderer for the given merchant UPI id and payee name.
    #[must_use]
    pub const fn new(upi_id: String, payee_name: String) -> Self {
        Self { upi_id, payee_name }
    }

    /// The scannable payment URI for `amount`.
    fn payment_uri(&self, amount: Rupees) -> String {
        let amount = format!("{:.2}", f64::from(amount.amount()));
        format!(
            "upi://pay?pa={}&pn={}&am={}&cu=INR",
            urlencoding::encode(&self.upi_id),
            urlencoding::encode(&self.payee_name),
            urlencoding::encode(&amount),
        )
    }
}

impl PaymentCodeRenderer for UpiPaymentCodeRenderer {
    fn render_payment_code(&self, amount: Rupees) -> Result<String, PaymentCodeError> {
        let code = QrCode::new(self.payment_uri(amount).as_bytes())
            .map_err(|e| PaymentCodeError(format!("qr encoding failed: {e}")))?;
        let image = code.render::<Luma<u8>>().build();

        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::L8,
            )
            .map_err(|e| PaymentCodeError(format!("png encoding failed: {e}")))?;

        Ok(base64::engine::general_purpose::STANDARD.encode(png))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn renderer() -> UpiPaymentCodeRenderer {
        UpiPaymentCodeRenderer::new("museum@upi".to_string(), "City Art Museum".to_string())
    }

    #[test]
    fn uri_embeds_merchant_and_amount() {
        let uri = renderer().payment_uri(Rupees::new(150));
        assert!(uri.starts_with("upi://pay?"));
        assert!(uri.contains("pa=museum%40upi"));
        assert!(uri.contains("am=150.00"));
        assert!(uri.contains("cu=INR"));
    }

    #[test]
    fn renders_a_base64_png() {
        let encoded = renderer().render_payment_code(Rupees::new(150)).unwrap();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
