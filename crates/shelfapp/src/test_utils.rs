use crate::model::Tool;
use crate::store::fs_backend::FsBackend;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A small catalog in the on-disk format, accents and all.
pub const SAMPLE_CATALOG_JSON: &str = r#"[
  {
    "nome": "ChatGPT",
    "introdução": "Assistente de conversa",
    "descrição": "Responde perguntas e escreve textos",
    "tags": ["ia", "texto"],
    "preco": "Freemium",
    "comentario_admin": "Uso todo dia",
    "link": "https://chat.openai.com"
  },
  {
    "nome": "Canva",
    "introdução": "Design gráfico",
    "descrição": "Editor online de imagens",
    "tags": ["design", "imagem"],
    "preco": "Freemium",
    "link": "https://canva.com"
  },
  {
    "nome": "Notion",
    "introdução": "Notas e wikis",
    "descrição": "Organize tudo em um lugar",
    "tags": ["produtividade", "texto"],
    "preco": "Gratuito",
    "link": "https://notion.so"
  },
  {
    "nome": "Midjourney",
    "introdução": "Imagens a partir de texto",
    "descrição": "Gera ilustrações",
    "tags": ["ia", "imagem"],
    "preco": "Assinatura",
    "comentario_admin": "   ",
    "link": "https://midjourney.com"
  },
  {
    "nome": "Photoshop",
    "introdução": "Edição de fotos",
    "descrição": null,
    "tags": ["imagem", "design"],
    "preco": "Pago",
    "link": "https://adobe.com"
  }
]"#;

pub fn sample_catalog() -> Vec<Tool> {
    crate::catalog::parse(SAMPLE_CATALOG_JSON).expect("sample catalog is valid")
}

/// `count` tools named `Tool 00`, `Tool 01`, ... all with the same price.
pub fn numbered_catalog(count: usize) -> Vec<Tool> {
    (0..count)
        .map(|i| Tool::new(format!("Tool {:02}", i), "Pago"))
        .collect()
}

pub struct TestEnv {
    // Held so the directory lives as long as the env
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Writes the sample catalog and returns its path.
    pub fn write_catalog(&self) -> PathBuf {
        self.write_file("data.json", SAMPLE_CATALOG_JSON)
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("failed to write test file");
        path
    }

    pub fn store_dir(&self) -> PathBuf {
        self.root.join("store")
    }

    pub fn backend(&self) -> FsBackend {
        FsBackend::new(self.store_dir())
    }

    pub fn path(&self) -> &Path {
        &self.root
    }
}
