/// Context detectors
///
/// Each detector looks at one ecosystem's marker files and returns the
/// actions worth offering there, or nothing. Detectors are independent and
/// never fail; "not applicable" is an empty list.

use crate::context::{Action, DirProbe};

/// Version-control metadata directory
pub fn detect_git(probe: &DirProbe) -> Vec<Action> {
    if !probe.exists(".git") {
        return Vec::new();
    }

    vec![
        Action::new("View status", "git status"),
        Action::new("View changes", "git diff"),
        Action::new("View staged changes", "git diff --staged"),
        Action::new("Add all changes", "git add ."),
        Action::new("Commit changes", "git commit"),
        Action::new("Push changes", "git push"),
        Action::new("Pull latest changes", "git pull"),
        Action::new("View commit history", "git log --oneline -10"),
        Action::new("List branches", "git branch"),
        Action::new("Stash changes", "git stash"),
        Action::new("Pop stash", "git stash pop"),
    ]
}

/// package.json, with Yarn variants first when yarn.lock is present
pub fn detect_node(probe: &DirProbe) -> Vec<Action> {
    if !probe.exists("package.json") {
        return Vec::new();
    }

    let mut actions = Vec::new();

    if probe.exists("yarn.lock") {
        actions.extend([
            Action::new("Install dependencies (Yarn)", "yarn install"),
            Action::new("Run dev server (Yarn)", "yarn dev"),
            Action::new("Run build (Yarn)", "yarn build"),
            Action::new("Run tests (Yarn)", "yarn test"),
        ]);
    }

    actions.extend([
        Action::new("Install dependencies", "npm install"),
        Action::new("Update dependencies", "npm update"),
        Action::new("Run dev server", "npm run dev"),
        Action::new("Run build", "npm run build"),
        Action::new("Run tests", "npm test"),
        Action::new("Check for vulnerabilities", "npm audit"),
        Action::new("View package info", "npm list --depth=0"),
    ]);

    actions
}

/// pyproject.toml, requirements.txt, Pipfile, or any top-level .py file
pub fn detect_python(probe: &DirProbe) -> Vec<Action> {
    let has_pyproject = probe.exists("pyproject.toml");
    let has_requirements = probe.exists("requirements.txt");
    let has_pipfile = probe.exists("Pipfile");

    if !has_pyproject && !has_requirements && !has_pipfile && !probe.has_match("*.py") {
        return Vec::new();
    }

    let mut actions = vec![
        Action::new("Run Python REPL", "python"),
        Action::new("List Python files", "find . -name *.py -type f"),
        Action::new("Check Python version", "python --version"),
    ];

    if has_requirements {
        actions.extend([
            Action::new("Install requirements", "pip install -r requirements.txt"),
            Action::new("List installed packages", "pip freeze"),
        ]);
    }

    if has_pipfile {
        actions.extend([
            Action::new("Install dependencies (Pipenv)", "pipenv install"),
            Action::new("Activate virtual env", "pipenv shell"),
            Action::new("Run with Pipenv", "pipenv run python"),
        ]);
    }

    if has_pyproject {
        actions.push(Action::new("Install project", "pip install -e ."));
    }

    if probe.exists("setup.py") {
        actions.push(Action::new("Install package", "python setup.py install"));
    }

    let has_tests =
        probe.exists("pytest.ini") || probe.has_match("test_*.py") || probe.has_match("*_test.py");
    if has_tests {
        actions.extend([
            Action::new("Run tests", "pytest"),
            Action::new("Run tests with coverage", "pytest --cov"),
        ]);
    }

    actions
}

/// go.mod, or loose .go files without one
pub fn detect_go(probe: &DirProbe) -> Vec<Action> {
    if !probe.exists("go.mod") && !probe.has_match("*.go") {
        return Vec::new();
    }

    vec![
        Action::new("Build project", "go build"),
        Action::new("Run project", "go run ."),
        Action::new("Test project", "go test ./..."),
        Action::new("Tidy dependencies", "go mod tidy"),
        Action::new("Format code", "go fmt ./..."),
        Action::new("Lint code", "golangci-lint run"),
        Action::new("View dependencies", "go list -m all"),
        Action::new("Check for updates", "go list -u -m all"),
        Action::new("Clean module cache", "go clean -modcache"),
    ]
}

/// Dockerfile and/or a compose file; each contributes its own actions
pub fn detect_docker(probe: &DirProbe) -> Vec<Action> {
    let has_dockerfile = probe.exists("Dockerfile");
    let has_compose = probe.exists("docker-compose.yml") || probe.exists("docker-compose.yaml");

    let mut actions = Vec::new();

    if has_dockerfile {
        let tag = image_tag(&probe.dir_name());
        actions.extend([
            Action::new("Build Docker image", format!("docker build -t {} .", tag)),
            Action::new("Run Docker container", format!("docker run -it {}", tag)),
        ]);
    }

    if has_compose {
        actions.extend([
            Action::new("Start services", "docker-compose up"),
            Action::new("Start services (detached)", "docker-compose up -d"),
            Action::new("Stop services", "docker-compose down"),
            Action::new("View logs", "docker-compose logs"),
            Action::new("Rebuild and start", "docker-compose up --build"),
        ]);
    }

    actions
}

/// Makefile in either common casing
pub fn detect_make(probe: &DirProbe) -> Vec<Action> {
    if !probe.exists("Makefile") && !probe.exists("makefile") {
        return Vec::new();
    }

    vec![
        Action::new("Show available targets", "make help"),
        Action::new("Build (default target)", "make"),
        Action::new("Clean build artifacts", "make clean"),
        Action::new("Install", "make install"),
        Action::new("Run tests", "make test"),
    ]
}

// Image references must be lowercase and can't hold whitespace
fn image_tag(dir_name: &str) -> String {
    let tag: String = dir_name
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '.' | '_' | '-' => c,
            'A'..='Z' => c.to_ascii_lowercase(),
            _ => '-',
        })
        .collect();
    let tag = tag.trim_matches(|c: char| !c.is_ascii_alphanumeric());
    if tag.is_empty() {
        "app".to_string()
    } else {
        tag.to_string()
    }
}
