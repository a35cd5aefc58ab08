use portada_core::{BrandingConfig, CardTemplate, RenderJob};

/// Fill the fixed card layout with one article's title, image, category
/// label and branding. Deterministic given identical inputs; the only
/// non-determinism lives in the renderer's own font and image fetches.
pub fn compose(job: &RenderJob, branding: &BrandingConfig, width: u32, height: u32) -> String {
    match branding.template {
        CardTemplate::Classic => classic(job, branding, width, height),
        CardTemplate::Overlay => overlay(job, branding, width, height),
    }
}

/// Centered image over a blurred copy of itself, title band below, logo
/// badge and category pill.
fn classic(job: &RenderJob, branding: &BrandingConfig, width: u32, height: u32) -> String {
    format!(
        r#"<html>
    <head>
        <link href="https://fonts.googleapis.com/css2?family=Poppins:wght@600&display=swap" rel="stylesheet">
        <style>
            body {{
                display: flex;
                flex-direction: column;
                align-items: center;
                justify-content: center;
                background-color: white;
                font-family: 'Poppins', sans-serif;
                margin: 0;
                height: 100vh;
            }}
            .container {{
                position: relative;
                width: {width}px;
                height: {height}px;
                display: flex;
                flex-direction: column;
                align-items: center;
                justify-content: center;
            }}
            .background {{
                position: absolute;
                top: 0;
                left: 0;
                width: 100%;
                height: 100%;
                background-image: url('{image_url}');
                background-size: cover;
                filter: blur(10px);
                z-index: 1;
            }}
            .image {{
                width: 95%;
                max-height: 80%;
                z-index: 2;
                margin-top: 10px;
            }}
            .logo {{
                position: absolute;
                bottom: 20%;
                left: 10px;
                width: 100px;
                border-radius: 5px;
                z-index: 2;
            }}
            .title {{
                margin-top: 5px;
                background: rgba(0, 0, 0, 0.7);
                color: white;
                padding: 8px;
                font-size: 46px;
                font-weight: 800;
                text-align: center;
                border-radius: 5px;
                position: relative;
                z-index: 2;
                line-height: 1.2;
            }}
            .category {{
                margin-top: 15px;
                background: {category_bg};
                color: {category_fg};
                padding: 6px;
                font-size: 32px;
                font-weight: 500;
                border-radius: 5px;
                position: relative;
                z-index: 2;
            }}
        </style>
    </head>
    <body>
        <div class="container">
            <div class="background"></div>
            <div class="title">{title}</div>
            <img class="image" src="{image_url}" alt="Imagen destacada" />
            <img class="logo" src="{logo_url}" alt="Logo" />
            <div class="category">{category}</div>
        </div>
    </body>
</html>"#,
        width = width,
        height = height,
        image_url = job.image_url,
        title = job.title,
        logo_url = branding.logo_url,
        category = job.category_label,
        category_bg = branding.category_bg_color,
        category_fg = branding.category_text_color,
    )
}

/// Full-bleed image with a darkening gradient and bottom-anchored title,
/// tuned for the vertical story aspect ratio.
fn overlay(job: &RenderJob, branding: &BrandingConfig, width: u32, height: u32) -> String {
    format!(
        r#"<html>
    <head>
        <link href="https://fonts.googleapis.com/css2?family=Montserrat:wght@800&family=Playfair+Display:wght@700&display=swap" rel="stylesheet">
        <style>
            body {{
                margin: 0;
                height: 100vh;
                display: flex;
                justify-content: center;
                align-items: center;
                background: linear-gradient(135deg, #000428 0%, #004e92 100%);
                overflow: hidden;
                font-family: 'Montserrat', sans-serif;
            }}
            .container {{
                position: relative;
                width: {width}px;
                height: {height}px;
                overflow: hidden;
            }}
            .background-overlay {{
                position: absolute;
                top: 0;
                left: 0;
                width: 100%;
                height: 100%;
                background: linear-gradient(to bottom,
                    rgba(0,0,0,0) 0%,
                    rgba(0,0,0,0.3) 50%,
                    rgba(0,0,0,0.7) 80%);
                z-index: 1;
            }}
            .featured-image {{
                position: absolute;
                top: 0;
                left: 0;
                width: 100%;
                height: 100%;
                object-fit: cover;
                z-index: 0;
                transform: scale(1.05);
                filter: brightness(0.9) contrast(1.1);
            }}
            .content {{
                position: relative;
                z-index: 2;
                height: 100%;
                display: flex;
                flex-direction: column;
                justify-content: flex-end;
                padding: 30px;
                padding-bottom: 210px;
                box-sizing: border-box;
            }}
            .title {{
                color: white;
                font-size: 48px;
                font-weight: 800;
                line-height: 1.15;
                margin-bottom: 25px;
                text-shadow: 0 2px 10px rgba(0,0,0,0.7);
                font-family: 'Playfair Display', serif;
                max-width: 90%;
            }}
            .category-badge {{
                background: {category_bg};
                color: {category_fg};
                padding: 10px 20px;
                font-size: 20px;
                font-weight: 800;
                border-radius: 30px;
                display: inline-block;
                margin-bottom: 25px;
                text-transform: uppercase;
                letter-spacing: 1.5px;
                align-self: flex-start;
            }}
            .logo-container {{
                position: absolute;
                top: 25px;
                left: 25px;
                z-index: 3;
            }}
            .logo {{
                height: 55px;
                filter: drop-shadow(0 2px 5px rgba(0,0,0,0.5));
            }}
        </style>
    </head>
    <body>
        <div class="container">
            <img class="featured-image" src="{image_url}" alt="Featured Image">
            <div class="background-overlay"></div>
            <div class="logo-container">
                <img class="logo" src="{logo_url}" alt="Logo">
            </div>
            <div class="content">
                <div class="category-badge">{category}</div>
                <h1 class="title">{title}</h1>
            </div>
        </div>
    </body>
</html>"#,
        width = width,
        height = height,
        image_url = job.image_url,
        title = job.title,
        logo_url = branding.logo_url,
        category = job.category_label,
        category_bg = branding.category_bg_color,
        category_fg = branding.category_text_color,
    )
}
