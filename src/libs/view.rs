use anyhow::Result;
use minijinja::Environment;
use serde::Serialize;

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("todo_form.html", include_str!("../../templates/todo_form.html")),
    ("directory_form.html", include_str!("../../templates/directory_form.html")),
];

/// Page renderer over the templates compiled into the binary.
pub struct View {
    env: Environment<'static>,
}

impl View {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }

        Ok(View { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(context)?)
    }
}
