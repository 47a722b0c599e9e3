// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF assembler: build a multi-page PDF, one placed image per page, using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use bildwerk_core::PageSize;
use bildwerk_core::error::Result;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};

use crate::image::decoder::DecodedImage;
use crate::layout::Placement;
use crate::traits::DocumentAssembler;

/// Resolution at which printpdf sizes an unscaled image. Placement scales are
/// computed relative to this.
const IMAGE_DPI: f32 = 300.0;

const MM_PER_INCH: f64 = 25.4;

/// Accumulates one page per placed image and serialises the result once.
pub struct PdfAssembler {
    doc: PdfDocument,
    pages: Vec<PdfPage>,
    page: PageSize,
}

impl PdfAssembler {
    /// Create an assembler producing pages of `page` size.
    pub fn new(page: PageSize) -> Self {
        Self::with_title(page, "Bildwerk Images")
    }

    /// Create an assembler with a title for the PDF metadata.
    pub fn with_title(page: PageSize, title: &str) -> Self {
        Self {
            doc: PdfDocument::new(title),
            pages: Vec::new(),
            page,
        }
    }

    /// Page dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        (
            Mm(self.page.width_mm as f32),
            Mm(self.page.height_mm as f32),
        )
    }
}

impl DocumentAssembler for PdfAssembler {
    fn page_size(&self) -> PageSize {
        self.page
    }

    #[instrument(skip_all, fields(page = self.pages.len() + 1))]
    fn append_page(&mut self, image: &DecodedImage, placement: &Placement) -> Result<()> {
        let (page_w, page_h) = self.page_dimensions();

        let img_width = image.width() as usize;
        let img_height = image.height() as usize;

        // Convert to RGB8 for printpdf.
        let rgb_image = image.as_dynamic().to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb_image.into_raw()),
            width: img_width,
            height: img_height,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = self.doc.add_image(&raw);

        // Unscaled, printpdf draws the image at `IMAGE_DPI`; stretch that to
        // the placed size.
        let native_w_mm = img_width as f64 / IMAGE_DPI as f64 * MM_PER_INCH;
        let native_h_mm = img_height as f64 / IMAGE_DPI as f64 * MM_PER_INCH;
        let scale_x = (placement.width / native_w_mm) as f32;
        let scale_y = (placement.height / native_h_mm) as f32;

        let (x_mm, y_mm) = placement.pdf_origin(self.page);

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Mm(x_mm as f32).into_pt()),
                translate_y: Some(Mm(y_mm as f32).into_pt()),
                scale_x: Some(scale_x),
                scale_y: Some(scale_y),
                dpi: Some(IMAGE_DPI),
                rotate: None,
            },
        }];

        self.pages.push(PdfPage::new(page_w, page_h, ops));

        debug!(x_mm, y_mm, scale_x, scale_y, "Image appended as page");
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn seal(self) -> Result<Vec<u8>> {
        let Self {
            mut doc, pages, ..
        } = self;
        let page_count = pages.len();
        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        info!(
            pages = page_count,
            bytes = output.len(),
            warnings = warnings.len(),
            "PDF sealed"
        );
        Ok(output)
    }
}
