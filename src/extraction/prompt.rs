//! The fixed extraction instruction sent to Gemini, and the built-in example
//! narrative used when the user provides no text.
//!
//! The prompt is in Indonesian, matching the input language and the report
//! the tool prints.

/// Default example narrative: acute stroke presentation, 73-year-old patient.
pub const DEFAULT_NARRATIVE: &str = "Pasien perempuan 73 tahun dibawa keluarga dengan keluhan \
mendadak lemah pada separuh tubuh kanan sejak 2 jam yang lalu. Pasien juga mengalami kesulitan \
berbicara. Riwayat hipertensi dan fibrilasi atrial.";

/// Use the provided narrative, or the built-in example when it is blank.
///
/// Returns the narrative to analyze and whether the default was substituted.
pub fn resolve_narrative(input: &str) -> (&str, bool) {
    if input.trim().is_empty() {
        (DEFAULT_NARRATIVE, true)
    } else {
        (input, false)
    }
}

/// Build the instruction prompt, embedding the narrative verbatim.
pub fn build_extraction_prompt(narrative: &str) -> String {
    format!(
        r#"Anda adalah sistem pakar terminologi medis khusus yang dirancang untuk mengonversi narasi klinis berbahasa Indonesia menjadi kode SNOMED CT. Tugas Anda adalah menganalisis teks medis dan mengekstrak konsep klinis utama, lalu memetakannya ke kode SNOMED CT yang paling sesuai. Fokus pada identifikasi:
1. Diagnosis/kondisi (disorder)
2. Gejala dan temuan klinis (finding)
3. Prosedur yang dilakukan (procedure)
4. Entitas yang dapat diamati (observable entity)
5. Obat-obatan yang diberikan atau diresepkan (medicinal product)

Untuk setiap konsep yang diidentifikasi, berikan:
- Kode SNOMED CT (snomedCode)
- Istilah Pilihan SNOMED CT (preferredTerm)
- Kategori semantik (semanticCategory: disorder, finding, procedure, observable entity, medicinal product)
- Skor kepercayaan (confidenceScore: High/Medium/Low)
- Konteks (context: present/absent/unknown)
- Lateralitas (laterality: left/right/bilateral/N/A)
- Tingkat keparahan (severity: mild/moderate/severe/N/A)
- Bentuk tunggal dari istilah yang diekstrak (singularForm)

Pertahankan akurasi klinis dan utamakan spesifisitas daripada generalitas saat memilih kode.

Teks klinis: "{narrative}"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_narrative_verbatim() {
        let narrative = "Pasien mengeluh nyeri dada sejak tadi malam.";
        let prompt = build_extraction_prompt(narrative);
        assert!(prompt.contains(&format!("Teks klinis: \"{narrative}\"")));
    }

    #[test]
    fn prompt_enumerates_output_fields() {
        let prompt = build_extraction_prompt("x");
        for field in [
            "snomedCode",
            "preferredTerm",
            "semanticCategory",
            "confidenceScore",
            "context",
            "laterality",
            "severity",
            "singularForm",
        ] {
            assert!(prompt.contains(field), "prompt missing {field}");
        }
    }

    #[test]
    fn blank_input_resolves_to_default() {
        let (narrative, used_default) = resolve_narrative("");
        assert_eq!(narrative, DEFAULT_NARRATIVE);
        assert!(used_default);

        let (narrative, used_default) = resolve_narrative("   \t  ");
        assert_eq!(narrative, DEFAULT_NARRATIVE);
        assert!(used_default);
    }

    #[test]
    fn given_text_passes_through_unchanged() {
        let (narrative, used_default) = resolve_narrative("Pasien demam tinggi.");
        assert_eq!(narrative, "Pasien demam tinggi.");
        assert!(!used_default);
    }
}
