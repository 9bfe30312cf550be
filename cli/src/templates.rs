//! Contents of the generated Vite configuration files.

/// Vite config for a static-hosting build served under `app_base_path`.
#[must_use]
pub fn hosting_config(app_base_path: &str) -> String {
    format!(
        r"import path from 'path';
import {{ defineConfig, loadEnv }} from 'vite';
import react from '@vitejs/plugin-react';

export default defineConfig(({{ mode }}) => {{
    const env = loadEnv(mode, '.', '');

    return {{
        base: '{app_base_path}', // required for GitHub Pages
        plugins: [react()],
        define: {{}},
        resolve: {{
            alias: {{
                '@': path.resolve(__dirname, '.'),
            }},
        }},
    }};
}});
"
    )
}

/// The two spellings of an application name used by the bundle config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleNames {
    /// File-name form: spaces become `-`, all lowercase.
    pub dashed: String,
    /// Global-variable form: `-`-separated words capitalized and joined.
    pub caps: String,
}

impl BundleNames {
    /// Derive both names from `app_name`.
    #[must_use]
    pub fn from_app_name(app_name: &str) -> Self {
        let dashed = app_name.replace(' ', "-").to_lowercase();
        let caps = app_name.split('-').map(capitalize).collect();
        Self { dashed, caps }
    }
}

/// First character uppercased, the rest lowercased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Vite config building a self-contained IIFE bundle.
#[must_use]
pub fn bundle_config(names: &BundleNames) -> String {
    let BundleNames { dashed, caps } = names;
    format!(
        r"import path from 'path';
import {{ defineConfig, loadEnv }} from 'vite';
import react from '@vitejs/plugin-react';

export default defineConfig(({{ mode }}) => {{
    const env = loadEnv(mode, '.', '');

    return {{
        plugins: [react()],
        build: {{
            outDir: 'dist',
            emptyOutDir: true,
            lib: {{
                entry: './index.tsx',
                name: '{caps}',
                formats: ['iife'],
                fileName: () => `{dashed}.iif.js`,
            }},
            rollupOptions: {{
                external: [],
                output: {{
                    globals: {{
                        react: 'React',
                        'react-dom': 'ReactDOM',
                    }},
                }},
            }},
        }},
        define: {{
            'process.env': {{
                NODE_ENV: JSON.stringify(mode || 'development'),
                API_KEY: JSON.stringify(env.GEMINI_API_KEY || ''),
                GEMINI_API_KEY: JSON.stringify(env.GEMINI_API_KEY || ''),
            }},
        }},
        resolve: {{
            alias: {{
                '@': path.resolve(__dirname, '.'),
            }},
        }},
    }};
}});
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_path_appears_verbatim() {
        let content = hosting_config("/user/repo/");
        assert!(content.contains("base: '/user/repo/', // required for GitHub Pages"));
        assert!(content.contains("import { defineConfig, loadEnv } from 'vite';"));
    }

    #[test]
    fn bundle_names_from_dashed_input() {
        let names = BundleNames::from_app_name("my-cool-app");
        assert_eq!(names.dashed, "my-cool-app");
        assert_eq!(names.caps, "MyCoolApp");
    }

    #[test]
    fn bundle_names_from_spaced_input() {
        let names = BundleNames::from_app_name("Sales Dashboard");
        assert_eq!(names.dashed, "sales-dashboard");
        assert_eq!(names.caps, "Sales dashboard");
    }

    #[test]
    fn bundle_names_lowercase_the_tail_of_each_word() {
        assert_eq!(BundleNames::from_app_name("API-client").caps, "ApiClient");
        assert_eq!(BundleNames::from_app_name("").caps, "");
    }

    #[test]
    fn bundle_config_uses_both_names() {
        let content = bundle_config(&BundleNames::from_app_name("my-app"));
        assert!(content.contains("name: 'MyApp',"));
        assert!(content.contains("fileName: () => `my-app.iif.js`,"));
    }
}
